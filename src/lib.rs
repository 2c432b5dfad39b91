//! Scooter Telemetry Library
//!
//! A Rust library for parsing batch telemetry logs emitted by electric
//! scooters into structured records.
//!
//! This library provides tools for:
//! - Validating packet framing and per-field length bounds
//! - Schema-driven parsing of DeviceInfo, PositionUpdate and Error packets
//! - Expanding variable-length repeat groups (error code lists)
//! - Strict conversion of numbers, identifiers and local timestamps
//! - Silent skipping of malformed lines with diagnostic statistics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod packet_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldValue, PacketType, Record};
pub use app::services::packet_parser::{PacketParser, ParseResult, parse_device_information};
pub use config::{Config, ParserConfig};

/// Result type alias for the scooter telemetry tool
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the I/O, configuration and output layers
///
/// Packet-level problems are not errors at this level: malformed lines are
/// skipped by the parser and only show up in its statistics.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Output serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an input not found error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
