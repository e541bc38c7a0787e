// Importer: validates, fetches inventory once, runs the metrics pipeline per input and
// flattens compute (ec2) and storage (ebs) records.

pub mod geolocation;

use futures_util::future::join_all;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::error::{ImportError, Result};
use crate::inventory::{InventoryClient, volume_ids};
use crate::models::{CloudWatchData, ComputeRecord, OutputRecord, PluginInput, StorageRecord, Volume};
use crate::monitoring::MonitoringClient;
use crate::pipeline::{PipelineParams, collect_metrics};

pub const CLOUD_VENDOR: &str = "aws";
pub const SERVICE_EC2: &str = "ec2";
pub const SERVICE_EBS: &str = "ebs";

pub struct Importer<M, I> {
    config: AppConfig,
    monitoring: M,
    inventory: I,
}

impl<M: MonitoringClient, I: InventoryClient> Importer<M, I> {
    pub fn new(config: AppConfig, monitoring: M, inventory: I) -> Self {
        Self {
            config,
            monitoring,
            inventory,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Imports every input. `services` overrides `importer.services` for this call only.
    /// Output is ordered by input; within one input compute records precede storage records.
    #[instrument(skip_all, fields(inputs_count = inputs.len()))]
    pub async fn execute(
        &self,
        inputs: &[PluginInput],
        services: Option<&str>,
    ) -> Result<Vec<OutputRecord>> {
        let config = match services {
            Some(services) => self.config.with_services(services),
            None => self.config.clone(),
        };
        config
            .validate()
            .map_err(|e| ImportError::Validation(e.to_string()))?;
        let windows = inputs
            .iter()
            .map(PluginInput::window)
            .collect::<Result<Vec<_>>>()?;

        let tag = config.importer.tag.as_str();
        let instances = self.inventory.describe_instances(tag).await?;
        let volume_ids = volume_ids(&instances);
        let volumes = self
            .inventory
            .describe_volumes(tag, &volume_ids)
            .await?
            .unwrap_or_default();
        info!(
            instances_count = instances.len(),
            volumes_count = volumes.len(),
            "inventory loaded"
        );

        let config = &config;
        let instances = &instances;
        let volumes = &volumes;
        let runs = inputs.iter().zip(windows).map(|(input, window)| async move {
            let params = PipelineParams::from_config(config, window);
            let data = collect_metrics(&self.monitoring, instances, &params).await?;
            Ok::<_, ImportError>(build_records(config, input, &data, volumes))
        });

        let outputs = join_all(runs)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        let records: Vec<OutputRecord> = outputs.into_iter().flatten().collect();
        info!(records_count = records.len(), "import complete");
        Ok(records)
    }
}

/// Output records for one input, filtered by the configured services.
/// Record fields take precedence over input fields of the same name.
/// Every compute record carries the first instance type seen in the catalog.
pub fn build_records(
    config: &AppConfig,
    input: &PluginInput,
    data: &CloudWatchData,
    volumes: &[Volume],
) -> Vec<OutputRecord> {
    let location = config.importer.location.as_str();
    let geolocation = geolocation::geolocation(location);
    let mut records = Vec::new();

    if config.importer.includes_service(SERVICE_EC2) {
        let instance_type = data.instance_types.first().cloned();
        let input = input.without_fields(ComputeRecord::FIELDS);
        records.extend(data.grouped_items.iter().map(|metrics| {
            OutputRecord::Compute(ComputeRecord {
                input: input.clone(),
                location: location.to_string(),
                geolocation: geolocation.to_string(),
                cloud_vendor: CLOUD_VENDOR.to_string(),
                cloud_service: SERVICE_EC2.to_string(),
                instance_type: instance_type.clone(),
                metrics: *metrics,
            })
        }));
    }

    if config.importer.includes_service(SERVICE_EBS) {
        let input = input.without_fields(StorageRecord::FIELDS);
        records.extend(volumes.iter().map(|volume| {
            OutputRecord::Storage(StorageRecord {
                input: input.clone(),
                location: location.to_string(),
                geolocation: geolocation.to_string(),
                cloud_vendor: CLOUD_VENDOR.to_string(),
                cloud_service: SERVICE_EBS.to_string(),
                storage_type: volume.storage_type(),
                storage_capacity: volume.size,
            })
        }));
    }

    records
}
