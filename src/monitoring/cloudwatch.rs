// CloudWatch via the AWS SDK

use aws_sdk_cloudwatch::Client;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::primitives::DateTime as AwsDateTime;
use aws_sdk_cloudwatch::types::{
    Dimension as AwsDimension, DimensionFilter, StandardUnit, Statistic as AwsStatistic,
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use super::MonitoringClient;
use crate::error::RemoteCallError;
use crate::models::{
    DIMENSION_INSTANCE_ID, Datapoint, Dimension, MetricDescriptor, MetricUnit, Statistic,
    StatisticsQuery, StatisticsResponse,
};

/// One client handle per importer, shared by reference across every call of a run.
#[derive(Debug, Clone)]
pub struct CloudWatchMonitor {
    client: Client,
}

impl CloudWatchMonitor {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

impl MonitoringClient for CloudWatchMonitor {
    #[instrument(skip(self), fields(operation = "list_metrics"))]
    async fn list_metrics(
        &self,
        namespace: &str,
        instance_id: &str,
    ) -> Result<Vec<MetricDescriptor>, RemoteCallError> {
        let filter = DimensionFilter::builder()
            .name(DIMENSION_INSTANCE_ID)
            .value(instance_id)
            .build();

        let mut metrics = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .client
                .list_metrics()
                .namespace(namespace)
                .dimensions(filter.clone())
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| RemoteCallError::new("list_metrics", DisplayErrorContext(&e)))?;

            metrics.extend(output.metrics().iter().map(|m| MetricDescriptor {
                metric_name: m.metric_name().unwrap_or_default().to_string(),
                namespace: m.namespace().unwrap_or(namespace).to_string(),
                dimensions: m
                    .dimensions()
                    .iter()
                    .map(|d| Dimension::new(d.name().unwrap_or_default(), d.value().unwrap_or_default()))
                    .collect(),
            }));

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(metrics)
    }

    #[instrument(skip(self, query), fields(operation = "get_metric_statistics", metric = %query.metric_name))]
    async fn get_statistics(
        &self,
        query: &StatisticsQuery,
    ) -> Result<StatisticsResponse, RemoteCallError> {
        let dimensions = query
            .dimensions
            .iter()
            .map(|d| AwsDimension::builder().name(&d.name).value(&d.value).build())
            .collect::<Vec<_>>();

        let statistic = match query.statistic {
            Statistic::Average => AwsStatistic::Average,
        };
        let period = i32::try_from(query.period_secs)
            .map_err(|e| RemoteCallError::new("get_metric_statistics", e))?;
        let unit = match query.unit {
            MetricUnit::Percent => StandardUnit::Percent,
            MetricUnit::Bytes => StandardUnit::Bytes,
        };

        let output = self
            .client
            .get_metric_statistics()
            .namespace(&query.namespace)
            .metric_name(&query.metric_name)
            .set_dimensions(Some(dimensions))
            .start_time(to_aws_time(query.window.start))
            .end_time(to_aws_time(query.window.end))
            .period(period)
            .statistics(statistic)
            .unit(unit)
            .send()
            .await
            .map_err(|e| RemoteCallError::new("get_metric_statistics", DisplayErrorContext(&e)))?;

        Ok(StatisticsResponse {
            label: output.label().map(str::to_string),
            datapoints: output
                .datapoints()
                .iter()
                .map(|dp| Datapoint {
                    timestamp: dp
                        .timestamp()
                        .and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())),
                    average: dp.average().unwrap_or_default(),
                    unit: dp.unit().map(|u| u.as_str().to_string()),
                })
                .collect(),
        })
    }
}

fn to_aws_time(ts: DateTime<Utc>) -> AwsDateTime {
    AwsDateTime::from_millis(ts.timestamp_millis())
}
