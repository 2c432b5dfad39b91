//! Structural validation of a tokenized line against its flattened schema

use super::error::{LineResult, PacketError};
use super::flattener::FlattenedField;

/// Flattened definitions and raw fields must line up one to one
pub fn validate_field_count(flattened: &[FlattenedField], fields: &[&str]) -> LineResult<()> {
    if flattened.len() != fields.len() {
        return Err(PacketError::FieldCountMismatch {
            expected: flattened.len(),
            found: fields.len(),
        });
    }
    Ok(())
}

/// Every raw field length must lie within its definition's inclusive bounds
///
/// Lengths are counted in characters.
pub fn validate_field_lengths(flattened: &[FlattenedField], fields: &[&str]) -> LineResult<()> {
    for (index, (field, raw)) in flattened.iter().zip(fields).enumerate() {
        let definition = field.definition;
        let length = raw.chars().count();

        if !definition.accepts_length(length) {
            return Err(PacketError::FieldLengthOutOfRange {
                field: definition.label().to_string(),
                index,
                length,
                min: definition.min_length,
                max: definition.max_length,
            });
        }
    }
    Ok(())
}

/// Run both structural checks
pub fn validate_line(flattened: &[FlattenedField], fields: &[&str]) -> LineResult<()> {
    validate_field_count(flattened, fields)?;
    validate_field_lengths(flattened, fields)
}
