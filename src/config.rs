//! Configuration management and validation.
//!
//! Provides the parser configuration (accepted packet types, diagnostic
//! recording) and the application configuration wrapping it with output
//! settings. Configuration is layered: defaults, then an optional TOML file,
//! then command-line overrides.

use crate::app::models::PacketType;
use crate::app::services::packet_parser::SchemaRegistry;
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_MAX_RECORDED_ERRORS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Packet parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Packet types the parser accepts; other known types are skipped
    pub accepted_packet_types: Vec<PacketType>,

    /// Keep a message for each rejected line in the statistics
    pub record_errors: bool,

    /// Maximum number of rejection messages kept
    pub max_recorded_errors: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            accepted_packet_types: PacketType::all_values().to_vec(),
            record_errors: true,
            max_recorded_errors: DEFAULT_MAX_RECORDED_ERRORS,
        }
    }
}

impl ParserConfig {
    /// Configuration for the fixed DeviceInfo-only layout
    pub fn device_info_only() -> Self {
        Self::default().with_packet_types(vec![PacketType::DeviceInfo])
    }

    /// Restrict accepted packet types
    pub fn with_packet_types(mut self, packet_types: Vec<PacketType>) -> Self {
        self.accepted_packet_types = packet_types;
        self
    }

    /// Disable recording of rejection messages
    pub fn without_error_recording(mut self) -> Self {
        self.record_errors = false;
        self
    }

    /// Set the cap on recorded rejection messages
    pub fn with_max_recorded_errors(mut self, max: usize) -> Self {
        self.max_recorded_errors = max;
        self
    }

    /// Build the schema registry described by this configuration
    pub fn schema_registry(&self) -> SchemaRegistry {
        SchemaRegistry::with_packet_types(&self.accepted_packet_types)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.accepted_packet_types.is_empty() {
            return Err(Error::configuration(
                "At least one packet type must be accepted",
            ));
        }
        Ok(())
    }
}

/// Output configuration for the command-line tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,

    /// Emit parse statistics alongside records
    pub include_stats: bool,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Default config file location (`<config dir>/scooter_telemetry/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load defaults, overlaid with the given file if any
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the full configuration
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.parser.accepted_packet_types.len(), 3);
        assert!(config.parser.record_errors);
        assert_eq!(config.parser.max_recorded_errors, DEFAULT_MAX_RECORDED_ERRORS);
        assert!(!config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_device_info_only() {
        let config = ParserConfig::device_info_only();
        let registry = config.schema_registry();
        assert!(registry.accepts(PacketType::DeviceInfo));
        assert!(!registry.accepts(PacketType::PositionUpdate));
        assert!(!registry.accepts(PacketType::Error));
    }

    #[test]
    fn test_builder_methods() {
        let config = ParserConfig::default()
            .without_error_recording()
            .with_max_recorded_errors(5);
        assert!(!config.record_errors);
        assert_eq!(config.max_recorded_errors, 5);
    }

    #[test]
    fn test_empty_packet_types_rejected() {
        let config = ParserConfig::default().with_packet_types(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml_str(
            r#"
[parser]
accepted_packet_types = ["DeviceInfo", "Error"]

[output]
pretty = true
"#,
        )
        .unwrap();

        assert_eq!(
            config.parser.accepted_packet_types,
            vec![PacketType::DeviceInfo, PacketType::Error]
        );
        assert!(config.parser.record_errors);
        assert!(config.output.pretty);
        assert!(!config.output.include_stats);
    }

    #[test]
    fn test_from_toml_unknown_packet_type() {
        let result = Config::from_toml_str("[parser]\naccepted_packet_types = [\"Telemetry\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[parser]\nmax_recorded_errors = 3").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.parser.max_recorded_errors, 3);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/scooter/config.toml"));
        assert!(result.is_err());
    }
}
