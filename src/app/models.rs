//! Data models for scooter telemetry parsing
//!
//! This module contains the core data structures produced by the packet parser:
//! the packet type enumeration, typed field values and the parsed record that
//! maps field names to values in definition order.

use crate::constants::packet_types;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Packet Type Enumeration
// =============================================================================

/// Packet types known to the schema registry
///
/// The packet type is read from the instruction field of a packet line and
/// selects the field layout used to parse the rest of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PacketType {
    /// Periodic device status report
    DeviceInfo,

    /// Position report (same layout as DeviceInfo)
    PositionUpdate,

    /// Error report carrying a variable list of error code/name pairs
    Error,
}

impl PacketType {
    /// Wire name of this packet type
    pub fn as_str(self) -> &'static str {
        match self {
            PacketType::DeviceInfo => packet_types::DEVICE_INFO,
            PacketType::PositionUpdate => packet_types::POSITION_UPDATE,
            PacketType::Error => packet_types::ERROR,
        }
    }

    /// Get all packet types
    pub fn all_values() -> [PacketType; 3] {
        [
            PacketType::DeviceInfo,
            PacketType::PositionUpdate,
            PacketType::Error,
        ]
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a packet type name is not in the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown packet type '{0}'")]
pub struct UnknownPacketType(pub String);

impl FromStr for PacketType {
    type Err = UnknownPacketType;

    /// Match is exact and case-sensitive, as on the wire
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            packet_types::DEVICE_INFO => Ok(PacketType::DeviceInfo),
            packet_types::POSITION_UPDATE => Ok(PacketType::PositionUpdate),
            packet_types::ERROR => Ok(PacketType::Error),
            other => Err(UnknownPacketType(other.to_string())),
        }
    }
}

// =============================================================================
// Field Values
// =============================================================================

/// A converted field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text value (raw pass-through or formatted, e.g. "86 %")
    Text(String),

    /// Integer value
    Integer(i64),

    /// Local wall-clock instant
    Timestamp(DateTime<Local>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Local>> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

/// Timestamps serialize the way a JSON-encoded JavaScript `Date` does:
/// UTC, millisecond precision, `Z` suffix.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(n) => serializer.serialize_i64(*n),
            FieldValue::Timestamp(t) => serializer.serialize_str(
                &t.with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        }
    }
}

// =============================================================================
// Parsed Record
// =============================================================================

/// One successfully parsed packet
///
/// Holds only the fields marked for inclusion by the packet schema, in the
/// order they were resolved. Inserting an existing name replaces its value
/// without moving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    packet_type: PacketType,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create an empty record for the given packet type
    pub fn new(packet_type: PacketType) -> Self {
        Self {
            packet_type,
            fields: Vec::new(),
        }
    }

    /// Insert or replace a field value
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Packet type this record was parsed from
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Field names in record order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over (name, value) pairs in record order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Records serialize as a flat JSON object; the packet type is not emitted
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
