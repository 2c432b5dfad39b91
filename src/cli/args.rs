//! Command-line argument definitions for the scooter telemetry parser
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::PacketType;
use crate::constants::packet_types;
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the scooter telemetry parser
///
/// Reads a telemetry log file, parses every valid packet line and prints the
/// resulting records as JSON. Malformed lines are skipped.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scooter_telemetry",
    version,
    about = "Parse scooter telemetry packet logs into JSON records",
    long_about = "Parses a batch log of newline-separated scooter telemetry packets \
                  (DeviceInfo, PositionUpdate and Error) into structured records. \
                  Lines that fail framing, schema, length or type checks are skipped \
                  silently; use --stats to see how many and why."
)]
pub struct Args {
    /// Telemetry log file to parse
    #[arg(value_name = "INPUT", help = "Telemetry log file to parse")]
    pub input: PathBuf,

    /// Configuration file (TOML)
    ///
    /// Defaults to <config dir>/scooter_telemetry/config.toml when present.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file (TOML)"
    )]
    pub config_file: Option<PathBuf>,

    /// Accept only DeviceInfo packets (fixed layout mode)
    #[arg(
        long = "device-info-only",
        help = "Accept only DeviceInfo packets",
        conflicts_with = "packet_types"
    )]
    pub device_info_only: bool,

    /// Packet types to accept (comma-separated list)
    #[arg(
        short = 't',
        long = "packet-types",
        value_name = "LIST",
        help = "Comma-separated list of packet types to accept (DeviceInfo,PositionUpdate,Error)"
    )]
    pub packet_types: Option<PacketTypeList>,

    /// Pretty-print JSON output
    #[arg(short = 'p', long = "pretty", help = "Pretty-print JSON output")]
    pub pretty: bool,

    /// Include parse statistics in the output
    #[arg(
        short = 's',
        long = "stats",
        help = "Wrap output as {records, stats} including skip statistics"
    )]
    pub stats: bool,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short = 'q', long = "quiet", help = "Only log errors")]
    pub quiet: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records (or {records, stats} object)
    Json,
    /// One JSON record per line
    JsonLines,
}

/// Wrapper for parsing comma-separated packet type lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketTypeList {
    pub packet_types: Vec<PacketType>,
}

impl FromStr for PacketTypeList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let packet_types = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                name.parse::<PacketType>().map_err(|_| {
                    Error::configuration(format!(
                        "Unknown packet type '{}'. Available: {}",
                        name,
                        packet_types::ALL.join(", ")
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if packet_types.is_empty() {
            return Err(Error::configuration(
                "At least one packet type must be specified",
            ));
        }

        Ok(Self { packet_types })
    }
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::input_not_found(self.input.display().to_string()));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Packet types requested on the command line, if any
    pub fn get_packet_types(&self) -> Option<Vec<PacketType>> {
        if self.device_info_only {
            Some(vec![PacketType::DeviceInfo])
        } else {
            self.packet_types.as_ref().map(|list| list.packet_types.clone())
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
