//! Value converters for packet fields
//!
//! Strict conversions from raw field strings to typed values. A raw value is
//! only accepted as a number if it is exactly the canonical decimal rendering
//! of that number, so leading zeros, signs and stray characters are rejected
//! rather than silently normalised.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};

use super::error::ConversionError;
use crate::constants::TIMESTAMP_FORMATS;

/// Parse a canonical non-negative decimal integer
pub fn parse_strict_integer(raw: &str) -> Result<i64, ConversionError> {
    if !is_canonical_decimal(raw) {
        return Err(ConversionError::InvalidNumber(raw.to_string()));
    }

    raw.parse::<i64>()
        .map_err(|_| ConversionError::InvalidNumber(raw.to_string()))
}

/// Parse a canonical non-negative decimal integer wider than `i64`
///
/// Used for identifiers such as the 15-digit IMEI.
pub fn parse_strict_large_integer(raw: &str) -> Result<u128, ConversionError> {
    if !is_canonical_decimal(raw) {
        return Err(ConversionError::InvalidNumber(raw.to_string()));
    }

    raw.parse::<u128>()
        .map_err(|_| ConversionError::InvalidNumber(raw.to_string()))
}

/// Parse a local wall-clock timestamp without timezone information
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD HH:MM:SS`. Times that fall
/// in a DST gap are rejected; ambiguous times resolve to the earliest instant.
/// Leap seconds (second `60`) are rejected.
pub fn parse_strict_timestamp(raw: &str) -> Result<DateTime<Local>, ConversionError> {
    let naive = TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .filter(|naive| naive.nanosecond() < 1_000_000_000)
        .ok_or_else(|| ConversionError::InvalidTimestamp(raw.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ConversionError::InvalidTimestamp(raw.to_string()))
}

/// Render a canonical integer followed by a unit, e.g. "86 %"
pub fn format_with_unit(raw: &str, unit: &str) -> Result<String, ConversionError> {
    let value = parse_strict_integer(raw)?;
    Ok(format!("{} {}", value, unit))
}

/// ASCII digits only, no leading zero unless the value is exactly "0"
fn is_canonical_decimal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    match bytes {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        _ => bytes.iter().all(u8::is_ascii_digit),
    }
}
