// Metrics pipeline: catalog lookup, statistics fan-out, averaging and record grouping.
// Every fan-out joins all calls on the current task before reporting the first failure.

pub mod aggregation;

use futures_util::future::join_all;
use std::future::Future;
use tracing::{debug, instrument, warn};

use crate::config::{AppConfig, Correlation};
use crate::error::RemoteCallError;
use crate::models::{
    CloudWatchData, InstanceCatalog, InstanceDescriptor, METRIC_CPU_UTILIZATION,
    METRIC_MEM_TOTAL, MetricUnit, Statistic, StatisticsQuery, StatisticsResponse, TimeWindow,
};
use crate::monitoring::MonitoringClient;

/// Per-run pipeline settings. Built fresh for each input; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    /// Namespace listing `mem_total` (CloudWatch agent).
    pub memory_namespace: String,
    /// Namespace listing `CPUUtilization` (EC2).
    pub cpu_namespace: String,
    pub window: TimeWindow,
    pub period_secs: u32,
    pub correlation: Correlation,
}

impl PipelineParams {
    pub fn from_config(config: &AppConfig, window: TimeWindow) -> Self {
        Self {
            memory_namespace: config.metric.cloudwatch_namespace.clone(),
            cpu_namespace: config.metric.client_namespace.clone(),
            window,
            period_secs: config.importer.observation_secs,
            correlation: config.importer.correlation,
        }
    }
}

/// Awaits every future, then returns all results in order or the first error.
async fn join_ordered<T, F>(
    operation: &'static str,
    futures: Vec<F>,
) -> Result<Vec<T>, RemoteCallError>
where
    F: Future<Output = Result<T, RemoteCallError>>,
{
    let results = join_all(futures).await;
    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        warn!(operation, failed, total = results.len(), "remote calls failed");
    }
    results.into_iter().collect()
}

/// Lists the metrics of every instance in `namespace`, one concurrent call per instance.
/// Output order matches `instances`.
#[instrument(skip(client, instances), fields(operation = "fetch_catalogs", instances_count = instances.len()))]
pub async fn fetch_catalogs<C: MonitoringClient>(
    client: &C,
    instances: &[InstanceDescriptor],
    namespace: &str,
) -> Result<Vec<InstanceCatalog>, RemoteCallError> {
    let calls = instances
        .iter()
        .map(|instance| async move {
            let metrics = client.list_metrics(namespace, &instance.instance_id).await?;
            Ok::<_, RemoteCallError>(InstanceCatalog {
                instance_id: instance.instance_id.clone(),
                metrics,
            })
        })
        .collect();
    join_ordered("list_metrics", calls).await
}

/// One query per catalog entry named `metric_name`, across all instances in catalog order.
pub fn build_queries(
    metric_name: &str,
    catalogs: &[InstanceCatalog],
    window: TimeWindow,
    period_secs: u32,
) -> Vec<StatisticsQuery> {
    let unit = MetricUnit::from_metric_name(metric_name);
    catalogs
        .iter()
        .flat_map(|c| &c.metrics)
        .filter(|m| m.metric_name == metric_name)
        .map(|m| StatisticsQuery {
            metric_name: m.metric_name.clone(),
            namespace: m.namespace.clone(),
            dimensions: m.dimensions.clone(),
            window,
            period_secs,
            unit,
            statistic: Statistic::Average,
        })
        .collect()
}

/// Runs every query concurrently. Responses come back in submission order.
#[instrument(skip(client, queries), fields(operation = "fetch_statistics", queries_count = queries.len()))]
pub async fn fetch_statistics<C: MonitoringClient>(
    client: &C,
    queries: &[StatisticsQuery],
) -> Result<Vec<StatisticsResponse>, RemoteCallError> {
    let calls = queries.iter().map(|q| client.get_statistics(q)).collect();
    join_ordered("get_metric_statistics", calls).await
}

/// Full pipeline for one input: memory and CPU averages per instance plus the instance types
/// seen in the memory namespace.
#[instrument(skip_all, fields(start = %params.window.start, instances_count = instances.len()))]
pub async fn collect_metrics<C: MonitoringClient>(
    client: &C,
    instances: &[InstanceDescriptor],
    params: &PipelineParams,
) -> Result<CloudWatchData, RemoteCallError> {
    let memory_catalogs = fetch_catalogs(client, instances, &params.memory_namespace).await?;
    let cpu_catalogs = fetch_catalogs(client, instances, &params.cpu_namespace).await?;

    let mut queries = build_queries(
        METRIC_MEM_TOTAL,
        &memory_catalogs,
        params.window,
        params.period_secs,
    );
    queries.extend(build_queries(
        METRIC_CPU_UTILIZATION,
        &cpu_catalogs,
        params.window,
        params.period_secs,
    ));

    let responses = fetch_statistics(client, &queries).await?;

    let metric_averages = aggregation::metric_averages(&queries, &responses);
    debug!(?metric_averages, "metric averages");
    let grouped_items = aggregation::group_records(&metric_averages, params.correlation);
    debug!(records = grouped_items.len(), "grouped items");

    Ok(CloudWatchData {
        grouped_items,
        instance_types: aggregation::instance_types(&memory_catalogs),
    })
}
