//! Parsing statistics and result structures for packet parsing
//!
//! The parser never reports rejected lines to its caller through the record
//! list. These counters give operational visibility into how much of a
//! payload was noise, and why, without changing that contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::RejectionKind;
use crate::app::models::{PacketType, Record};
use crate::constants::SUCCESS_RATE_THRESHOLD;

/// Parsing result with records and statistics
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    /// Successfully parsed records in input line order
    pub records: Vec<Record>,

    /// Parsing statistics
    pub stats: ParseStats,
}

/// Number of rejected lines per failure category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub framing_invalid: usize,
    pub unknown_packet_type: usize,
    pub packet_type_not_accepted: usize,
    pub invalid_repeat_count: usize,
    pub field_count_mismatch: usize,
    pub field_length_out_of_range: usize,
    pub field_conversion_failed: usize,
}

impl RejectionCounts {
    /// Count one rejection
    pub fn record(&mut self, kind: RejectionKind) {
        let counter = match kind {
            RejectionKind::FramingInvalid => &mut self.framing_invalid,
            RejectionKind::UnknownPacketType => &mut self.unknown_packet_type,
            RejectionKind::PacketTypeNotAccepted => &mut self.packet_type_not_accepted,
            RejectionKind::InvalidRepeatCount => &mut self.invalid_repeat_count,
            RejectionKind::FieldCountMismatch => &mut self.field_count_mismatch,
            RejectionKind::FieldLengthOutOfRange => &mut self.field_length_out_of_range,
            RejectionKind::FieldConversionFailed => &mut self.field_conversion_failed,
        };
        *counter += 1;
    }

    /// Total rejections across all categories
    pub fn total(&self) -> usize {
        self.framing_invalid
            + self.unknown_packet_type
            + self.packet_type_not_accepted
            + self.invalid_repeat_count
            + self.field_count_mismatch
            + self.field_length_out_of_range
            + self.field_conversion_failed
    }
}

/// Packet parsing statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of lines encountered
    pub total_lines: usize,

    /// Number of records successfully parsed
    pub records_parsed: usize,

    /// Number of lines skipped
    pub lines_skipped: usize,

    /// Skipped lines broken down by reason
    pub rejections: RejectionCounts,

    /// Parsed records per packet type
    pub records_by_type: BTreeMap<PacketType, usize>,

    /// Rejection messages ("Line N: reason"), capped by configuration
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_lines: 0,
            records_parsed: 0,
            lines_skipped: 0,
            rejections: RejectionCounts::default(),
            records_by_type: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// Count an accepted line
    pub fn record_accepted(&mut self, packet_type: PacketType) {
        self.records_parsed += 1;
        *self.records_by_type.entry(packet_type).or_insert(0) += 1;
    }

    /// Count a rejected line
    pub fn record_rejected(&mut self, kind: RejectionKind) {
        self.lines_skipped += 1;
        self.rejections.record(kind);
    }

    /// Parsed record count for one packet type
    pub fn records_of_type(&self, packet_type: PacketType) -> usize {
        self.records_by_type.get(&packet_type).copied().unwrap_or(0)
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_lines as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > SUCCESS_RATE_THRESHOLD
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
