// EC2 inventory seam: running instances and their EBS volumes, selected by Project tag.

#[cfg(feature = "aws")]
mod ec2;

#[cfg(feature = "aws")]
pub use ec2::Ec2Inventory;

use std::future::Future;

use crate::error::RemoteCallError;
use crate::models::{InstanceDescriptor, Volume};

pub trait InventoryClient {
    /// Running instances tagged `Project = tag`.
    fn describe_instances(
        &self,
        tag: &str,
    ) -> impl Future<Output = Result<Vec<InstanceDescriptor>, RemoteCallError>> + Send;

    /// Volumes tagged `Project = tag`, restricted to `volume_ids` when non-empty.
    /// `None` when the service returned no volume list.
    fn describe_volumes(
        &self,
        tag: &str,
        volume_ids: &[String],
    ) -> impl Future<Output = Result<Option<Vec<Volume>>, RemoteCallError>> + Send;
}

/// Volume ids of every block device across `instances`, in instance order.
pub fn volume_ids(instances: &[InstanceDescriptor]) -> Vec<String> {
    instances
        .iter()
        .filter_map(|i| i.block_devices.as_ref())
        .flatten()
        .map(|d| d.volume_id.clone())
        .collect()
}
