// Pure reduction of statistics responses: averaging, label grouping, record pairing.
// Remote calls stay in pipeline::mod.

use std::collections::HashMap;

use crate::config::Correlation;
use crate::models::{
    AggregatedMetric, Datapoint, GroupedRecord, InstanceCatalog, METRIC_CPU_UTILIZATION,
    METRIC_MEM_TOTAL, StatisticsQuery, StatisticsResponse,
};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn bytes_to_gb(bytes: f64) -> f64 {
    bytes / BYTES_PER_GB
}

/// Mean of the datapoint averages; byte values are converted to GiB first.
/// No datapoints averages to 0.
pub fn average(datapoints: &[Datapoint], is_percent: bool) -> f64 {
    if datapoints.is_empty() {
        return 0.0;
    }
    let sum: f64 = if is_percent {
        datapoints.iter().map(|dp| dp.average).sum()
    } else {
        datapoints
            .iter()
            .map(|dp| {
                let gb = bytes_to_gb(dp.average);
                if gb.is_nan() { 0.0 } else { gb }
            })
            .sum()
    };
    sum / datapoints.len() as f64
}

/// One average per tracked response, in submission order. Untracked labels are dropped.
/// Responses without a label fall back to the metric name of their query.
pub fn metric_averages(
    queries: &[StatisticsQuery],
    responses: &[StatisticsResponse],
) -> Vec<AggregatedMetric> {
    queries
        .iter()
        .zip(responses)
        .filter_map(|(query, response)| {
            let label = response.label.as_deref().unwrap_or(&query.metric_name);
            if label != METRIC_MEM_TOTAL && label != METRIC_CPU_UTILIZATION {
                return None;
            }
            let is_percent = label == METRIC_CPU_UTILIZATION;
            Some(AggregatedMetric {
                label: label.to_string(),
                instance_id: query.instance_id().map(str::to_string),
                value: average(&response.datapoints, is_percent),
            })
        })
        .collect()
}

/// Averages of the two tracked metrics, each in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelGroups {
    pub memory: Vec<f64>,
    pub cpu: Vec<f64>,
}

pub fn group_by_label(metrics: &[AggregatedMetric]) -> LabelGroups {
    let mut groups = LabelGroups::default();
    for metric in metrics {
        match metric.label.as_str() {
            METRIC_MEM_TOTAL => groups.memory.push(metric.value),
            METRIC_CPU_UTILIZATION => groups.cpu.push(metric.value),
            _ => {}
        }
    }
    groups
}

/// Pairs memory and CPU by index. Output length is the shorter of the two; a missing label
/// yields no records.
pub fn zip_positional(groups: &LabelGroups) -> Vec<GroupedRecord> {
    groups
        .memory
        .iter()
        .zip(&groups.cpu)
        .map(|(&memory, &cpu)| GroupedRecord {
            memory_utilization: memory,
            cpu_utilization: cpu,
        })
        .collect()
}

/// Pairs memory and CPU by instance id, ordered by first memory appearance.
/// Instances lacking either metric are dropped; the first value per instance and label wins.
pub fn join_by_instance(metrics: &[AggregatedMetric]) -> Vec<GroupedRecord> {
    let mut cpu_by_instance: HashMap<&str, f64> = HashMap::new();
    for m in metrics.iter().filter(|m| m.label == METRIC_CPU_UTILIZATION) {
        if let Some(id) = m.instance_id.as_deref() {
            cpu_by_instance.entry(id).or_insert(m.value);
        }
    }

    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    for m in metrics.iter().filter(|m| m.label == METRIC_MEM_TOTAL) {
        let Some(id) = m.instance_id.as_deref() else {
            continue;
        };
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        if let Some(&cpu) = cpu_by_instance.get(id) {
            out.push(GroupedRecord {
                memory_utilization: m.value,
                cpu_utilization: cpu,
            });
        }
    }
    out
}

pub fn group_records(metrics: &[AggregatedMetric], correlation: Correlation) -> Vec<GroupedRecord> {
    match correlation {
        Correlation::Positional => zip_positional(&group_by_label(metrics)),
        Correlation::Instance => join_by_instance(metrics),
    }
}

/// Every `InstanceType` dimension value, in catalog order. Duplicates are kept.
pub fn instance_types(catalogs: &[InstanceCatalog]) -> Vec<String> {
    catalogs
        .iter()
        .flat_map(|c| &c.metrics)
        .filter_map(|m| m.instance_type())
        .map(str::to_string)
        .collect()
}
