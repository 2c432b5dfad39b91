//! Line framing and tokenization
//!
//! A packet line is `+<field>,<field>,...,<field>$`. There is no escaping, so
//! a delimiter can never appear inside a field value.

use super::error::{LineResult, PacketError};
use crate::constants::{END_CHAR, FIELD_DELIMITER, LINE_SEPARATOR, START_CHAR};

/// Split a payload into raw lines
///
/// A trailing separator does not produce an extra empty line.
pub fn split_lines(payload: &str) -> impl Iterator<Item = &str> {
    payload.split_terminator(LINE_SEPARATOR)
}

/// Check the start and end markers and return the content between them
pub fn strip_framing(line: &str) -> LineResult<&str> {
    line.strip_prefix(START_CHAR)
        .and_then(|rest| rest.strip_suffix(END_CHAR))
        .ok_or(PacketError::FramingInvalid)
}

/// Validate framing and split the line body into raw fields
///
/// Empty fields are kept; their legality is decided by length bounds.
pub fn tokenize_line(line: &str) -> LineResult<Vec<&str>> {
    let body = strip_framing(line)?;
    Ok(body.split(FIELD_DELIMITER).collect())
}
