// Serialization and mapping of domain models

use aws_importer::models::*;

#[test]
fn storage_type_from_volume_type() {
    assert_eq!(StorageType::from_volume_type("gp3"), Some(StorageType::Ssd));
    assert_eq!(StorageType::from_volume_type("sc1"), Some(StorageType::Hdd));
    assert_eq!(StorageType::from_volume_type("gp2"), None);
    assert_eq!(StorageType::from_volume_type(""), None);
}

#[test]
fn volume_without_type_is_unclassified() {
    let v = Volume {
        volume_id: Some("vol-1".into()),
        volume_type: None,
        size: Some(8),
    };
    assert_eq!(v.storage_type(), None);
}

#[test]
fn storage_type_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&StorageType::Ssd).unwrap(), "\"ssd\"");
    assert_eq!(serde_json::to_string(&StorageType::Hdd).unwrap(), "\"hdd\"");
}

#[test]
fn grouped_record_uses_slash_field_names() {
    let record = GroupedRecord {
        memory_utilization: 0.9272994995117188,
        cpu_utilization: 0.6914698759172085,
    };
    let value = serde_json::to_value(record).unwrap();
    assert_eq!(value[FIELD_MEMORY_UTILIZATION], 0.9272994995117188);
    assert_eq!(value[FIELD_CPU_UTILIZATION], 0.6914698759172085);
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn storage_record_flattens_input() {
    let record = OutputRecord::Storage(StorageRecord {
        input: PluginInput::new("2024-03-26T14:08:00.000Z", 3600),
        location: "eu-central-1".into(),
        geolocation: "50.1213155,8.471759".into(),
        cloud_vendor: "aws".into(),
        cloud_service: "ebs".into(),
        storage_type: Some(StorageType::Hdd),
        storage_capacity: Some(125),
    });
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["timestamp"], "2024-03-26T14:08:00.000Z");
    assert_eq!(value["duration"], 3600);
    assert_eq!(value["cloud/service"], "ebs");
    assert_eq!(value["storage/type"], "hdd");
    assert!(value.get("input").is_none());
}
