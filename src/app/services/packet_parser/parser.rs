//! Core packet parser implementation
//!
//! This module provides the batch parser orchestration: splitting a payload
//! into lines and running each line through framing, schema lookup,
//! flattening, validation and record building. Invalid lines are skipped and
//! counted; they never abort the run.

use tracing::{debug, info};

use super::error::LineResult;
use super::flattener::flatten_schema;
use super::record_parser::build_record;
use super::schema::SchemaRegistry;
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::{split_lines, tokenize_line};
use super::validator::validate_line;
use crate::app::models::Record;
use crate::config::ParserConfig;
use crate::constants::PACKET_TYPE_FIELD_INDEX;

/// Schema-driven parser for scooter telemetry payloads
///
/// The parser holds only immutable configuration, so a single instance can
/// parse any number of payloads and each call is independent of the others.
#[derive(Debug, Clone)]
pub struct PacketParser {
    registry: SchemaRegistry,
    config: ParserConfig,
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl PacketParser {
    /// Create a parser from configuration
    pub fn new(config: ParserConfig) -> Self {
        Self {
            registry: config.schema_registry(),
            config,
        }
    }

    /// Parser for the fixed DeviceInfo-only layout
    pub fn device_info_only() -> Self {
        Self::new(ParserConfig::device_info_only())
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Parse a payload and return records with statistics
    pub fn parse(&self, payload: &str) -> ParseResult {
        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        for (index, line) in split_lines(payload).enumerate() {
            let line_number = index + 1;
            stats.total_lines += 1;

            match self.parse_line(line) {
                Ok(record) => {
                    stats.record_accepted(record.packet_type());
                    records.push(record);
                }
                Err(e) => {
                    stats.record_rejected(e.kind());
                    debug!("Skipped line {}: {}", line_number, e);

                    if self.config.record_errors
                        && stats.errors.len() < self.config.max_recorded_errors
                    {
                        stats.errors.push(format!("Line {}: {}", line_number, e));
                    }
                }
            }
        }

        info!(
            "Parsed {} records from {} lines ({} skipped)",
            stats.records_parsed, stats.total_lines, stats.lines_skipped
        );

        ParseResult { records, stats }
    }

    /// Parse a payload and return only the accepted records
    pub fn parse_records(&self, payload: &str) -> Vec<Record> {
        self.parse(payload).records
    }

    /// Run the full pipeline on a single line
    pub fn parse_line(&self, line: &str) -> LineResult<Record> {
        let fields = tokenize_line(line)?;

        let packet_type_name = fields
            .get(PACKET_TYPE_FIELD_INDEX)
            .copied()
            .unwrap_or_default();
        let (packet_type, definitions) = self.registry.lookup(packet_type_name)?;

        let flattened = flatten_schema(definitions, &fields)?;
        validate_line(&flattened, &fields)?;

        build_record(packet_type, &flattened, &fields)
    }
}

/// Parse a payload with the default configuration, returning only records
///
/// Malformed lines are silently omitted; a payload of only malformed lines
/// yields an empty list.
pub fn parse_device_information(payload: &str) -> Vec<Record> {
    PacketParser::default().parse_records(payload)
}
