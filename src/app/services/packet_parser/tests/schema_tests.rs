//! Tests for field definitions and the schema registry

use crate::app::models::PacketType;
use crate::app::services::packet_parser::error::PacketError;
use crate::app::services::packet_parser::schema::{
    Converter, DEVICE_INFO_FIELDS, ERROR_FIELDS, FieldDefinition, FieldName, SchemaRegistry,
    schema_for,
};

#[test]
fn test_device_info_layout() {
    let labels: Vec<&str> = DEVICE_INFO_FIELDS.iter().map(|d| d.label()).collect();
    assert_eq!(
        labels,
        vec!["type", "instruction", "imei", "batteryLevel", "odometer", "time", "countNumber"]
    );

    let included: Vec<&str> = DEVICE_INFO_FIELDS
        .iter()
        .filter(|d| d.include_in_record)
        .map(|d| d.label())
        .collect();
    assert_eq!(included, vec!["imei", "batteryLevel", "odometer", "time"]);

    assert!(DEVICE_INFO_FIELDS.iter().all(|d| !d.is_repeat_count()));
}

#[test]
fn test_error_layout() {
    let error_count = &ERROR_FIELDS[3];
    assert!(error_count.is_named("errorCount"));
    assert!(error_count.is_repeat_count());
    assert!(!error_count.include_in_record);
    assert_eq!((error_count.min_length, error_count.max_length), (1, 1));

    let entry = error_count.children;
    assert_eq!(entry.len(), 2);
    assert!(entry[0].is_named("errorCode"));
    assert_eq!(
        entry[1].name,
        FieldName::Paired {
            label: "errorNameOrValue",
            value_field: "errorCode",
        }
    );
    assert_eq!(entry[1].converter, Some(Converter::Integer));
    assert!(entry[1].include_in_record);
}

#[test]
fn test_schema_for_shares_device_info_layout() {
    assert_eq!(schema_for(PacketType::DeviceInfo), DEVICE_INFO_FIELDS);
    assert_eq!(schema_for(PacketType::PositionUpdate), DEVICE_INFO_FIELDS);
    assert_eq!(schema_for(PacketType::Error), ERROR_FIELDS);
}

#[test]
fn test_field_definition_builders() {
    const CHILDREN: &[FieldDefinition] = &[FieldDefinition::new("child", 1, 2)];
    let definition = FieldDefinition::new("count", 1, 1)
        .with_converter(Converter::Integer)
        .with_children(CHILDREN)
        .included();

    assert_eq!(definition.label(), "count");
    assert!(definition.is_repeat_count());
    assert!(definition.include_in_record);
    assert!(definition.accepts_length(1));
    assert!(!definition.accepts_length(0));
    assert!(!definition.accepts_length(2));
    assert!(!definition.is_named("child"));
}

#[test]
fn test_registry_lookup() {
    let registry = SchemaRegistry::new();

    let (packet_type, definitions) = registry.lookup("Error").unwrap();
    assert_eq!(packet_type, PacketType::Error);
    assert_eq!(definitions, ERROR_FIELDS);

    assert_eq!(
        registry.lookup("NotDeviceInfo"),
        Err(PacketError::UnknownPacketType {
            name: "NotDeviceInfo".to_string()
        })
    );
    assert!(matches!(
        registry.lookup("deviceinfo"),
        Err(PacketError::UnknownPacketType { .. })
    ));
}

#[test]
fn test_registry_restricted() {
    let registry = SchemaRegistry::device_info_only();

    assert!(registry.lookup("DeviceInfo").is_ok());
    assert_eq!(
        registry.lookup("Error"),
        Err(PacketError::PacketTypeNotAccepted {
            name: "Error".to_string()
        })
    );
    assert!(!registry.accepts(PacketType::PositionUpdate));
}

#[test]
fn test_registry_dedups_packet_types() {
    let registry = SchemaRegistry::with_packet_types(&[
        PacketType::Error,
        PacketType::DeviceInfo,
        PacketType::Error,
    ]);

    assert_eq!(
        registry.accepted_packet_types(),
        &[PacketType::DeviceInfo, PacketType::Error]
    );
}
