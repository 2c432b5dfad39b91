//! Record building for validated packet lines
//!
//! Maps each flattened definition marked for inclusion through its converter
//! and assembles the parsed record. A single conversion failure discards the
//! whole line; no partial record is ever returned.

use tracing::trace;

use super::error::{LineResult, PacketError};
use super::flattener::FlattenedField;
use super::schema::FieldName;
use crate::app::models::{FieldValue, PacketType, Record};

/// Build a record from a validated line
pub fn build_record(
    packet_type: PacketType,
    flattened: &[FlattenedField],
    fields: &[&str],
) -> LineResult<Record> {
    let mut record = Record::new(packet_type);

    for (index, field) in flattened.iter().enumerate() {
        let definition = field.definition;
        if !definition.include_in_record {
            continue;
        }

        let Some(&raw) = fields.get(index) else {
            return Err(PacketError::FieldCountMismatch {
                expected: flattened.len(),
                found: fields.len(),
            });
        };
        let (name, value_raw) = match definition.name {
            FieldName::Fixed(name) => (name.to_string(), raw),
            FieldName::Paired { value_field, .. } => {
                let value_raw = paired_value(field, value_field, fields).ok_or_else(|| {
                    PacketError::MissingPairedValue {
                        field: definition.label().to_string(),
                        value_field: value_field.to_string(),
                    }
                })?;
                (raw.to_string(), value_raw)
            }
        };

        let value = match definition.converter {
            Some(converter) => converter
                .convert(value_raw)
                .map_err(|e| PacketError::conversion(definition.label(), e))?,
            None => FieldValue::Text(value_raw.to_string()),
        };

        trace!("Resolved field '{}' = {}", name, value);
        record.insert(name, value);
    }

    Ok(record)
}

/// Raw value of the sibling a paired field takes its value from
fn paired_value<'a>(field: &FlattenedField, value_field: &str, fields: &[&'a str]) -> Option<&'a str> {
    field
        .group
        .and_then(|group| group.sibling_index(value_field))
        .and_then(|index| fields.get(index).copied())
}
