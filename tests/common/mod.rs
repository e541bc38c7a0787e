// Shared test helpers: in-memory CloudWatch and EC2 doubles

#![allow(dead_code)]

use aws_importer::config::AppConfig;
use aws_importer::error::RemoteCallError;
use aws_importer::inventory::InventoryClient;
use aws_importer::models::*;
use aws_importer::monitoring::MonitoringClient;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
pub const AGENT_NAMESPACE: &str = "TOS_AMI_CloudwatchAgentMetrics";
pub const EC2_NAMESPACE: &str = "AWS/EC2";

pub const VALID_CONFIG: &str = r#"
[importer]
tag = "GreenSoftware"
location = "eu-central-1"
services = "ec2, ebs"
observation_secs = 60

[metric]
cloudwatch_namespace = "TOS_AMI_CloudwatchAgentMetrics"
client_namespace = "AWS/EC2"
"#;

pub fn config() -> AppConfig {
    AppConfig::load_from_str(VALID_CONFIG).expect("valid config")
}

#[derive(Default)]
pub struct MockMonitor {
    catalogs: HashMap<(String, String), Vec<MetricDescriptor>>,
    datapoints: HashMap<(String, String), Vec<f64>>,
    failing_instance: Option<String>,
    failing_statistics: bool,
    pub list_calls: AtomicUsize,
    pub queries: Mutex<Vec<StatisticsQuery>>,
}

impl MockMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists `metric_name` for `instance_id` in `namespace`, with optional extra dimensions.
    pub fn with_metric(
        mut self,
        namespace: &str,
        instance_id: &str,
        metric_name: &str,
        extra: &[(&str, &str)],
    ) -> Self {
        let mut dimensions = vec![Dimension::new(DIMENSION_INSTANCE_ID, instance_id)];
        dimensions.extend(extra.iter().map(|(n, v)| Dimension::new(*n, *v)));
        self.catalogs
            .entry((namespace.to_string(), instance_id.to_string()))
            .or_default()
            .push(MetricDescriptor {
                metric_name: metric_name.to_string(),
                namespace: namespace.to_string(),
                dimensions,
            });
        self
    }

    pub fn with_datapoints(mut self, metric_name: &str, instance_id: &str, values: &[f64]) -> Self {
        self.datapoints.insert(
            (metric_name.to_string(), instance_id.to_string()),
            values.to_vec(),
        );
        self
    }

    /// Memory (bytes) and CPU (percent) for one instance.
    pub fn with_instance(self, instance_id: &str, mem_bytes: f64, cpu_percent: f64) -> Self {
        self.with_metric(AGENT_NAMESPACE, instance_id, METRIC_MEM_TOTAL, &[])
            .with_metric(EC2_NAMESPACE, instance_id, METRIC_CPU_UTILIZATION, &[])
            .with_datapoints(METRIC_MEM_TOTAL, instance_id, &[mem_bytes])
            .with_datapoints(METRIC_CPU_UTILIZATION, instance_id, &[cpu_percent])
    }

    pub fn failing_list_for(mut self, instance_id: &str) -> Self {
        self.failing_instance = Some(instance_id.to_string());
        self
    }

    pub fn failing_statistics(mut self) -> Self {
        self.failing_statistics = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_queries(&self) -> Vec<StatisticsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl MonitoringClient for MockMonitor {
    async fn list_metrics(
        &self,
        namespace: &str,
        instance_id: &str,
    ) -> Result<Vec<MetricDescriptor>, RemoteCallError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_instance.as_deref() == Some(instance_id) {
            return Err(RemoteCallError::new("list_metrics", "AccessDenied"));
        }
        Ok(self
            .catalogs
            .get(&(namespace.to_string(), instance_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_statistics(
        &self,
        query: &StatisticsQuery,
    ) -> Result<StatisticsResponse, RemoteCallError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.failing_statistics {
            return Err(RemoteCallError::new("get_metric_statistics", "Throttling"));
        }
        let instance_id = query.instance_id().unwrap_or_default().to_string();
        let values = self
            .datapoints
            .get(&(query.metric_name.clone(), instance_id))
            .cloned()
            .unwrap_or_default();
        Ok(StatisticsResponse {
            label: Some(query.metric_name.clone()),
            datapoints: values.into_iter().map(Datapoint::average).collect(),
        })
    }
}

#[derive(Default)]
pub struct MockInventory {
    pub instances: Vec<InstanceDescriptor>,
    pub volumes: Option<Vec<Volume>>,
    pub failing: bool,
}

impl MockInventory {
    pub fn with_instances(ids: &[&str]) -> Self {
        Self {
            instances: ids
                .iter()
                .enumerate()
                .map(|(n, id)| InstanceDescriptor {
                    instance_id: id.to_string(),
                    image_id: "ami-1234567890abcdef0".into(),
                    instance_type: Some("t2.micro".into()),
                    root_device_name: "/dev/sda1".into(),
                    block_devices: Some(vec![BlockDevice {
                        device_name: "/dev/sda1".into(),
                        volume_id: format!("vol-{n}"),
                    }]),
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_volumes(mut self, volumes: &[(&str, i32)]) -> Self {
        self.volumes = Some(
            volumes
                .iter()
                .enumerate()
                .map(|(n, (volume_type, size))| Volume {
                    volume_id: Some(format!("vol-{n}")),
                    volume_type: Some(volume_type.to_string()),
                    size: Some(*size),
                })
                .collect(),
        );
        self
    }
}

impl InventoryClient for MockInventory {
    async fn describe_instances(
        &self,
        _tag: &str,
    ) -> Result<Vec<InstanceDescriptor>, RemoteCallError> {
        if self.failing {
            return Err(RemoteCallError::new("describe_instances", "UnauthorizedOperation"));
        }
        Ok(self.instances.clone())
    }

    async fn describe_volumes(
        &self,
        _tag: &str,
        _volume_ids: &[String],
    ) -> Result<Option<Vec<Volume>>, RemoteCallError> {
        Ok(self.volumes.clone())
    }
}
