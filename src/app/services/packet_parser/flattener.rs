//! Schema flattening for repeat groups
//!
//! A packet schema may contain repeat-count columns whose raw value says how
//! many times a group of child definitions follows. Flattening resolves those
//! counts against one line's raw fields and yields exactly one definition per
//! expected raw field.
//!
//! The count for a group is read from the raw field at the position the count
//! definition lands on in the *flattened* output, never at its index in the
//! schema, so any earlier expansion shifts it correctly.

use super::error::{LineResult, PacketError};
use super::field_parsers::parse_strict_integer;
use super::schema::FieldDefinition;

/// One instance of an expanded repeat group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatGroup {
    /// Flattened index of the first field of this instance
    pub start: usize,

    /// Child definitions making up the group
    pub definitions: &'static [FieldDefinition],
}

impl RepeatGroup {
    /// Flattened index of the sibling with the given fixed name
    pub fn sibling_index(&self, name: &str) -> Option<usize> {
        self.definitions
            .iter()
            .position(|definition| definition.is_named(name))
            .map(|offset| self.start + offset)
    }
}

/// A definition placed at a concrete raw field position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedField {
    pub definition: &'static FieldDefinition,

    /// Repeat-group instance this field belongs to, if any
    pub group: Option<RepeatGroup>,
}

/// Expand a schema against the raw fields of one line
pub fn flatten_schema(
    definitions: &'static [FieldDefinition],
    fields: &[&str],
) -> LineResult<Vec<FlattenedField>> {
    let mut flattened = Vec::with_capacity(fields.len());
    flatten_into(definitions, None, fields, &mut flattened)?;
    Ok(flattened)
}

fn flatten_into(
    definitions: &'static [FieldDefinition],
    group: Option<RepeatGroup>,
    fields: &[&str],
    flattened: &mut Vec<FlattenedField>,
) -> LineResult<()> {
    for definition in definitions {
        flattened.push(FlattenedField { definition, group });

        if !definition.is_repeat_count() {
            continue;
        }

        let count_index = flattened.len() - 1;
        let count = read_repeat_count(definition, fields.get(count_index).copied())?;

        // Refuse counts that cannot possibly fit the line before allocating for them
        let required = count
            .checked_mul(definition.children.len())
            .and_then(|n| n.checked_add(flattened.len()));
        match required {
            Some(required) if required <= fields.len() => {}
            _ => {
                return Err(PacketError::FieldCountMismatch {
                    expected: required.unwrap_or(usize::MAX),
                    found: fields.len(),
                });
            }
        }

        for _ in 0..count {
            let instance = RepeatGroup {
                start: flattened.len(),
                definitions: definition.children,
            };
            flatten_into(definition.children, Some(instance), fields, flattened)?;
        }
    }

    Ok(())
}

/// Parse a repeat count as a plain integer, independent of the field's converter
fn read_repeat_count(definition: &FieldDefinition, raw: Option<&str>) -> LineResult<usize> {
    let invalid = || PacketError::InvalidRepeatCount {
        field: definition.label().to_string(),
        value: raw.unwrap_or_default().to_string(),
    };

    let raw = raw.ok_or_else(invalid)?;
    let count = parse_strict_integer(raw).map_err(|_| invalid())?;
    usize::try_from(count).map_err(|_| invalid())
}
