// CloudWatch catalog and statistics types.

use chrono::{DateTime, TimeDelta, Utc};

use super::{DIMENSION_INSTANCE_ID, DIMENSION_INSTANCE_TYPE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One named, dimensioned time series listed by CloudWatch.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    pub metric_name: String,
    pub namespace: String,
    pub dimensions: Vec<Dimension>,
}

impl MetricDescriptor {
    /// Value of the first dimension named `name`.
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.dimension(DIMENSION_INSTANCE_ID)
    }

    pub fn instance_type(&self) -> Option<&str> {
        self.dimension(DIMENSION_INSTANCE_TYPE)
    }
}

/// Result of one list-metrics call: every descriptor CloudWatch reports for an instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceCatalog {
    pub instance_id: String,
    pub metrics: Vec<MetricDescriptor>,
}

/// Unit requested from CloudWatch for a statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Percent,
    Bytes,
}

impl MetricUnit {
    /// Any metric whose name mentions "mem" is fetched in bytes; everything else is a percentage.
    pub fn from_metric_name(metric_name: &str) -> Self {
        if metric_name.contains("mem") {
            MetricUnit::Bytes
        } else {
            MetricUnit::Percent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricUnit::Percent => "Percent",
            MetricUnit::Bytes => "Bytes",
        }
    }
}

/// Only averages are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Statistic {
    #[default]
    Average,
}

/// Query window `[start, start + duration]`, shared by every query of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// `None` when the end falls outside chrono's representable range.
    pub fn new(start: DateTime<Utc>, duration_secs: i64) -> Option<Self> {
        let end = start.checked_add_signed(TimeDelta::try_seconds(duration_secs)?)?;
        Some(Self { start, end })
    }
}

/// Descriptor for one get-metric-statistics call.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsQuery {
    pub metric_name: String,
    pub namespace: String,
    pub dimensions: Vec<Dimension>,
    pub window: TimeWindow,
    /// Bucket width in seconds.
    pub period_secs: u32,
    pub unit: MetricUnit,
    pub statistic: Statistic,
}

impl StatisticsQuery {
    pub fn instance_id(&self) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == DIMENSION_INSTANCE_ID)
            .map(|d| d.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    pub timestamp: Option<DateTime<Utc>>,
    pub average: f64,
    pub unit: Option<String>,
}

impl Datapoint {
    pub fn average(average: f64) -> Self {
        Self {
            timestamp: None,
            average,
            unit: None,
        }
    }
}

/// Raw get-metric-statistics result. CloudWatch labels the response with the metric name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatisticsResponse {
    pub label: Option<String>,
    pub datapoints: Vec<Datapoint>,
}

/// One scalar per query after averaging and unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedMetric {
    pub label: String,
    pub instance_id: Option<String>,
    pub value: f64,
}
