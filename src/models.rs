// Domain models: inventory, metric catalog, statistics, output records

mod input;
mod inventory;
mod metrics;
mod records;

pub use input::PluginInput;
pub use inventory::{BlockDevice, InstanceDescriptor, StorageType, Volume};
pub use metrics::{
    AggregatedMetric, Datapoint, Dimension, InstanceCatalog, MetricDescriptor, MetricUnit,
    Statistic, StatisticsQuery, StatisticsResponse, TimeWindow,
};
pub use records::{CloudWatchData, ComputeRecord, GroupedRecord, OutputRecord, StorageRecord};

/// Dimension name that carries the EC2 instance id in CloudWatch.
pub const DIMENSION_INSTANCE_ID: &str = "InstanceId";
/// Dimension name that carries the EC2 instance type in CloudWatch.
pub const DIMENSION_INSTANCE_TYPE: &str = "InstanceType";

/// Memory metric published by the CloudWatch agent.
pub const METRIC_MEM_TOTAL: &str = "mem_total";
/// CPU metric published by EC2.
pub const METRIC_CPU_UTILIZATION: &str = "CPUUtilization";

/// Output field for the memory average.
pub const FIELD_MEMORY_UTILIZATION: &str = "memory/utilization";
/// Output field for the CPU average.
pub const FIELD_CPU_UTILIZATION: &str = "cpu/utilization";
