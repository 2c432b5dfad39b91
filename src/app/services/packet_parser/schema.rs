//! Packet schema registry
//!
//! Each packet type is described by a `'static` table of [`FieldDefinition`]s.
//! A definition fixes the raw length bounds of one column, how its value is
//! converted, whether it appears in the parsed record and, for repeat-count
//! columns, the group of child definitions that repeats.

use super::error::{ConversionError, PacketError};
use super::field_parsers::{
    format_with_unit, parse_strict_integer, parse_strict_large_integer, parse_strict_timestamp,
};
use crate::app::models::{FieldValue, PacketType};
use crate::constants::{BATTERY_UNIT, ODOMETER_UNIT};

/// How the record key of a field is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    /// Fixed label; the value comes from the field itself
    Fixed(&'static str),

    /// The field's own raw value is the record key; the value comes from the
    /// sibling named `value_field` in the same repeat-group instance
    Paired {
        label: &'static str,
        value_field: &'static str,
    },
}

/// Closed set of value conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Canonical large integer, kept as its decimal text
    LargeInteger,

    /// Canonical integer
    Integer,

    /// Canonical integer rendered with a unit suffix ("86 %")
    WithUnit(&'static str),

    /// Local wall-clock timestamp
    Timestamp,
}

impl Converter {
    /// Convert a raw field string into a typed value
    pub fn convert(self, raw: &str) -> Result<FieldValue, ConversionError> {
        match self {
            Converter::LargeInteger => {
                parse_strict_large_integer(raw).map(|n| FieldValue::Text(n.to_string()))
            }
            Converter::Integer => parse_strict_integer(raw).map(FieldValue::Integer),
            Converter::WithUnit(unit) => format_with_unit(raw, unit).map(FieldValue::Text),
            Converter::Timestamp => parse_strict_timestamp(raw).map(FieldValue::Timestamp),
        }
    }
}

/// Schema description of one packet column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: FieldName,

    /// Minimum raw length in characters (inclusive)
    pub min_length: usize,

    /// Maximum raw length in characters (inclusive)
    pub max_length: usize,

    pub converter: Option<Converter>,

    /// Definitions repeated once per unit of this field's numeric value
    pub children: &'static [FieldDefinition],

    /// Whether the converted value is emitted in the parsed record
    pub include_in_record: bool,
}

impl FieldDefinition {
    /// Plain column: length bounds only, not emitted
    pub const fn new(name: &'static str, min_length: usize, max_length: usize) -> Self {
        Self {
            name: FieldName::Fixed(name),
            min_length,
            max_length,
            converter: None,
            children: &[],
            include_in_record: false,
        }
    }

    /// Column whose raw value is the record key for a sibling's value
    pub const fn paired(
        label: &'static str,
        value_field: &'static str,
        min_length: usize,
        max_length: usize,
    ) -> Self {
        Self {
            name: FieldName::Paired { label, value_field },
            min_length,
            max_length,
            converter: None,
            children: &[],
            include_in_record: false,
        }
    }

    pub const fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    pub const fn with_children(mut self, children: &'static [FieldDefinition]) -> Self {
        self.children = children;
        self
    }

    pub const fn included(mut self) -> Self {
        self.include_in_record = true;
        self
    }

    /// Label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self.name {
            FieldName::Fixed(name) | FieldName::Paired { label: name, .. } => name,
        }
    }

    /// Whether the raw value drives a repeat group
    pub fn is_repeat_count(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check the raw length against the inclusive bounds
    pub fn accepts_length(&self, length: usize) -> bool {
        (self.min_length..=self.max_length).contains(&length)
    }

    /// Whether this definition has the given fixed name
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self.name, FieldName::Fixed(fixed) if fixed == name)
    }
}

// =============================================================================
// Packet Schemas
// =============================================================================

/// Layout shared by DeviceInfo and PositionUpdate packets
pub const DEVICE_INFO_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new("type", 2, 3),
    FieldDefinition::new("instruction", 1, 20),
    FieldDefinition::new("imei", 15, 15)
        .with_converter(Converter::LargeInteger)
        .included(),
    FieldDefinition::new("batteryLevel", 1, 3)
        .with_converter(Converter::WithUnit(BATTERY_UNIT))
        .included(),
    FieldDefinition::new("odometer", 1, 6)
        .with_converter(Converter::WithUnit(ODOMETER_UNIT))
        .included(),
    FieldDefinition::new("time", 19, 19)
        .with_converter(Converter::Timestamp)
        .included(),
    FieldDefinition::new("countNumber", 4, 4),
];

/// One error entry: numeric code followed by the error name
const ERROR_ENTRY_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new("errorCode", 1, 2),
    FieldDefinition::paired("errorNameOrValue", "errorCode", 1, 20)
        .with_converter(Converter::Integer)
        .included(),
];

/// Error packet layout with a counted list of error entries
pub const ERROR_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new("type", 2, 3),
    FieldDefinition::new("instruction", 1, 5),
    FieldDefinition::new("imei", 15, 15)
        .with_converter(Converter::LargeInteger)
        .included(),
    FieldDefinition::new("errorCount", 1, 1)
        .with_converter(Converter::Integer)
        .with_children(ERROR_ENTRY_FIELDS),
    FieldDefinition::new("time", 19, 19)
        .with_converter(Converter::Timestamp)
        .included(),
    FieldDefinition::new("countNumber", 4, 4),
];

/// Field definitions for a packet type
pub fn schema_for(packet_type: PacketType) -> &'static [FieldDefinition] {
    match packet_type {
        PacketType::DeviceInfo | PacketType::PositionUpdate => DEVICE_INFO_FIELDS,
        PacketType::Error => ERROR_FIELDS,
    }
}

/// Registry of the packet types a parser accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    accepted: Vec<PacketType>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Registry accepting every known packet type
    pub fn new() -> Self {
        Self {
            accepted: PacketType::all_values().to_vec(),
        }
    }

    /// Registry restricted to the given packet types
    pub fn with_packet_types(packet_types: &[PacketType]) -> Self {
        let mut accepted = packet_types.to_vec();
        accepted.sort();
        accepted.dedup();
        Self { accepted }
    }

    /// Registry for the fixed DeviceInfo-only layout
    pub fn device_info_only() -> Self {
        Self::with_packet_types(&[PacketType::DeviceInfo])
    }

    /// Look up the schema for a packet type name
    pub fn lookup(&self, name: &str) -> Result<(PacketType, &'static [FieldDefinition]), PacketError> {
        let packet_type = name
            .parse::<PacketType>()
            .map_err(|e| PacketError::UnknownPacketType { name: e.0 })?;

        if !self.accepts(packet_type) {
            return Err(PacketError::PacketTypeNotAccepted {
                name: name.to_string(),
            });
        }

        Ok((packet_type, schema_for(packet_type)))
    }

    pub fn accepts(&self, packet_type: PacketType) -> bool {
        self.accepted.contains(&packet_type)
    }

    pub fn accepted_packet_types(&self) -> &[PacketType] {
        &self.accepted
    }
}
