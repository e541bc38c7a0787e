// EC2 inventory via the AWS SDK

use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::Filter;
use tracing::{debug, instrument};

use super::InventoryClient;
use crate::error::RemoteCallError;
use crate::models::{BlockDevice, InstanceDescriptor, Volume};

const TAG_FILTER: &str = "tag:Project";
const STATE_FILTER: &str = "instance-state-name";

#[derive(Debug, Clone)]
pub struct Ec2Inventory {
    client: Client,
}

impl Ec2Inventory {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

fn tag_filter(tag: &str) -> Filter {
    Filter::builder().name(TAG_FILTER).values(tag).build()
}

impl InventoryClient for Ec2Inventory {
    #[instrument(skip(self), fields(operation = "describe_instances"))]
    async fn describe_instances(
        &self,
        tag: &str,
    ) -> Result<Vec<InstanceDescriptor>, RemoteCallError> {
        let mut instances = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .client
                .describe_instances()
                .filters(tag_filter(tag))
                .filters(Filter::builder().name(STATE_FILTER).values("running").build())
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| RemoteCallError::new("describe_instances", DisplayErrorContext(&e)))?;

            for reservation in output.reservations() {
                instances.extend(reservation.instances().iter().map(|i| InstanceDescriptor {
                    instance_id: i.instance_id().unwrap_or_default().to_string(),
                    image_id: i.image_id().unwrap_or_default().to_string(),
                    instance_type: i.instance_type().map(|t| t.as_str().to_string()),
                    root_device_name: i.root_device_name().unwrap_or_default().to_string(),
                    block_devices: Some(
                        i.block_device_mappings()
                            .iter()
                            .map(|m| BlockDevice {
                                device_name: m.device_name().unwrap_or_default().to_string(),
                                volume_id: m
                                    .ebs()
                                    .and_then(|ebs| ebs.volume_id())
                                    .unwrap_or_default()
                                    .to_string(),
                            })
                            .collect(),
                    ),
                }));
            }

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        debug!(instances_count = instances.len(), "instances described");
        Ok(instances)
    }

    #[instrument(skip(self, volume_ids), fields(operation = "describe_volumes", volume_ids_count = volume_ids.len()))]
    async fn describe_volumes(
        &self,
        tag: &str,
        volume_ids: &[String],
    ) -> Result<Option<Vec<Volume>>, RemoteCallError> {
        let ids = (!volume_ids.is_empty()).then(|| volume_ids.to_vec());
        let output = self
            .client
            .describe_volumes()
            .filters(tag_filter(tag))
            .set_volume_ids(ids)
            .send()
            .await
            .map_err(|e| RemoteCallError::new("describe_volumes", DisplayErrorContext(&e)))?;

        let volumes = output.volumes();
        if volumes.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            volumes
                .iter()
                .map(|v| Volume {
                    volume_id: v.volume_id().map(str::to_string),
                    volume_type: v.volume_type().map(|t| t.as_str().to_string()),
                    size: v.size(),
                })
                .collect(),
        ))
    }
}
