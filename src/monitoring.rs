// Monitoring service seam: list-metrics and get-metric-statistics.

#[cfg(feature = "aws")]
mod cloudwatch;

#[cfg(feature = "aws")]
pub use cloudwatch::CloudWatchMonitor;

use std::future::Future;

use crate::error::RemoteCallError;
use crate::models::{MetricDescriptor, StatisticsQuery, StatisticsResponse};

/// Read-only CloudWatch operations used by the metrics pipeline.
/// Both calls are idempotent; no retry or timeout is applied on top of them.
pub trait MonitoringClient {
    /// Every metric in `namespace` whose dimensions include `InstanceId = instance_id`.
    fn list_metrics(
        &self,
        namespace: &str,
        instance_id: &str,
    ) -> impl Future<Output = Result<Vec<MetricDescriptor>, RemoteCallError>> + Send;

    /// Average statistics for one metric over the query window.
    fn get_statistics(
        &self,
        query: &StatisticsQuery,
    ) -> impl Future<Output = Result<StatisticsResponse, RemoteCallError>> + Send;
}
