// Pipeline output and the flat observation records emitted per input.

use serde::Serialize;

use super::{FIELD_CPU_UTILIZATION, FIELD_MEMORY_UTILIZATION, PluginInput, StorageType};

/// Memory and CPU averages for one instance position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupedRecord {
    /// GiB.
    #[serde(rename = "memory/utilization")]
    pub memory_utilization: f64,
    /// Percent.
    #[serde(rename = "cpu/utilization")]
    pub cpu_utilization: f64,
}

/// Result of one metrics pipeline run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloudWatchData {
    pub grouped_items: Vec<GroupedRecord>,
    pub instance_types: Vec<String>,
}

/// EC2 observation: input fields, location annotations and the grouped averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputeRecord {
    #[serde(flatten)]
    pub input: PluginInput,
    pub location: String,
    pub geolocation: String,
    #[serde(rename = "cloud/vendor")]
    pub cloud_vendor: String,
    #[serde(rename = "cloud/service")]
    pub cloud_service: String,
    #[serde(rename = "cloud/instance-type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(flatten)]
    pub metrics: GroupedRecord,
}

impl ComputeRecord {
    /// Keys set by the record itself. Input fields with these names are overridden.
    pub const FIELDS: &'static [&'static str] = &[
        "location",
        "geolocation",
        "cloud/vendor",
        "cloud/service",
        "cloud/instance-type",
        FIELD_MEMORY_UTILIZATION,
        FIELD_CPU_UTILIZATION,
    ];
}

/// EBS observation: input fields, location annotations and volume facts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageRecord {
    #[serde(flatten)]
    pub input: PluginInput,
    pub location: String,
    pub geolocation: String,
    #[serde(rename = "cloud/vendor")]
    pub cloud_vendor: String,
    #[serde(rename = "cloud/service")]
    pub cloud_service: String,
    #[serde(rename = "storage/type", skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    #[serde(rename = "storage/capacity", skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<i32>,
}

impl StorageRecord {
    pub const FIELDS: &'static [&'static str] = &[
        "location",
        "geolocation",
        "cloud/vendor",
        "cloud/service",
        "storage/type",
        "storage/capacity",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputRecord {
    Compute(ComputeRecord),
    Storage(StorageRecord),
}
