// EC2 instances and EBS volumes as returned by the inventory layer.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDevice {
    pub device_name: String,
    pub volume_id: String,
}

/// A running EC2 instance. Missing ids from the API are kept as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstanceDescriptor {
    pub instance_id: String,
    pub image_id: String,
    pub instance_type: Option<String>,
    pub root_device_name: String,
    /// `None` when EC2 returned no block-device mapping at all.
    pub block_devices: Option<Vec<BlockDevice>>,
}

impl InstanceDescriptor {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ..Default::default()
        }
    }
}

/// Storage class reported in `storage/type`; serializes to lowercase ("ssd", "hdd").
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Ssd,
    Hdd,
}

impl StorageType {
    /// Maps an EBS volume type: gp3 is SSD, sc1 is HDD, others are not classified.
    pub fn from_volume_type(volume_type: &str) -> Option<Self> {
        match volume_type {
            "gp3" => Some(StorageType::Ssd),
            "sc1" => Some(StorageType::Hdd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Volume {
    pub volume_id: Option<String>,
    pub volume_type: Option<String>,
    /// Size in GiB.
    pub size: Option<i32>,
}

impl Volume {
    pub fn storage_type(&self) -> Option<StorageType> {
        self.volume_type
            .as_deref()
            .and_then(StorageType::from_volume_type)
    }
}
