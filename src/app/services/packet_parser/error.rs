//! Line-level failure types for packet parsing
//!
//! Every variant describes why a single line was discarded. None of them is
//! fatal to a parse run; the batch parser counts and logs them and moves on.

use thiserror::Error;

/// Failure converting a raw field string into a typed value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Not the canonical decimal rendering of an integer
    #[error("Not a valid number: '{0}'")]
    InvalidNumber(String),

    /// Not a valid local date/time
    #[error("Not a valid timestamp: '{0}'")]
    InvalidTimestamp(String),
}

/// Reason a packet line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Line does not start with the start marker or end with the end marker
    #[error("Invalid framing: line must start with '+' and end with '$'")]
    FramingInvalid,

    /// Instruction field names no registered (or accepted) packet type
    #[error("Unknown packet type '{name}'")]
    UnknownPacketType { name: String },

    /// Known packet type that the current configuration does not accept
    #[error("Packet type '{name}' is not accepted by this parser")]
    PacketTypeNotAccepted { name: String },

    /// Repeat-count field is missing, negative or not a number
    #[error("Invalid repeat count for field '{field}': '{value}'")]
    InvalidRepeatCount { field: String, value: String },

    /// Flattened schema and raw line disagree on the number of fields
    #[error("Field count mismatch: expected {expected}, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    /// Raw field length outside the definition's inclusive bounds
    #[error(
        "Field '{field}' at position {index} has length {length}, expected {min}..={max}"
    )]
    FieldLengthOutOfRange {
        field: String,
        index: usize,
        length: usize,
        min: usize,
        max: usize,
    },

    /// A paired field has no sibling to take its value from
    #[error("Field '{field}' has no paired '{value_field}' value")]
    MissingPairedValue { field: String, value_field: String },

    /// A converter rejected the raw value
    #[error("Field '{field}' could not be converted: {source}")]
    FieldConversionFailed {
        field: String,
        #[source]
        source: ConversionError,
    },
}

/// Rejection categories used for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    FramingInvalid,
    UnknownPacketType,
    PacketTypeNotAccepted,
    InvalidRepeatCount,
    FieldCountMismatch,
    FieldLengthOutOfRange,
    FieldConversionFailed,
}

impl PacketError {
    /// Create a conversion failure for the named field
    pub fn conversion(field: impl Into<String>, source: ConversionError) -> Self {
        Self::FieldConversionFailed {
            field: field.into(),
            source,
        }
    }

    /// Category of this failure
    pub fn kind(&self) -> RejectionKind {
        match self {
            PacketError::FramingInvalid => RejectionKind::FramingInvalid,
            PacketError::UnknownPacketType { .. } => RejectionKind::UnknownPacketType,
            PacketError::PacketTypeNotAccepted { .. } => RejectionKind::PacketTypeNotAccepted,
            PacketError::InvalidRepeatCount { .. } => RejectionKind::InvalidRepeatCount,
            PacketError::FieldCountMismatch { .. } => RejectionKind::FieldCountMismatch,
            PacketError::FieldLengthOutOfRange { .. } => RejectionKind::FieldLengthOutOfRange,
            PacketError::MissingPairedValue { .. } | PacketError::FieldConversionFailed { .. } => {
                RejectionKind::FieldConversionFailed
            }
        }
    }
}

/// Result type for line-level parsing steps
pub type LineResult<T> = std::result::Result<T, PacketError>;
