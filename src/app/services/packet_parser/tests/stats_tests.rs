//! Tests for parsing statistics functionality

use crate::app::models::PacketType;
use crate::app::services::packet_parser::error::{PacketError, RejectionKind};
use crate::app::services::packet_parser::stats::{ParseStats, RejectionCounts};

#[test]
fn test_parse_stats_calculation() {
    let mut stats = ParseStats::new();
    stats.total_lines = 100;
    for _ in 0..95 {
        stats.record_accepted(PacketType::DeviceInfo);
    }
    for _ in 0..5 {
        stats.record_rejected(RejectionKind::FramingInvalid);
    }

    assert_eq!(stats.success_rate(), 95.0);
    assert!(stats.is_successful());
    assert_eq!(stats.records_of_type(PacketType::DeviceInfo), 95);
    assert_eq!(stats.lines_skipped, 5);

    let mut poor_stats = ParseStats::new();
    poor_stats.total_lines = 10;
    for _ in 0..9 {
        poor_stats.record_accepted(PacketType::Error);
    }

    assert_eq!(poor_stats.success_rate(), 90.0);
    assert!(!poor_stats.is_successful());
}

#[test]
fn test_parse_stats_empty() {
    let empty_stats = ParseStats::default();

    assert_eq!(empty_stats.total_lines, 0);
    assert_eq!(empty_stats.records_parsed, 0);
    assert_eq!(empty_stats.lines_skipped, 0);
    assert!(empty_stats.errors.is_empty());
    assert!(empty_stats.records_by_type.is_empty());
    assert_eq!(empty_stats.success_rate(), 0.0);
    assert!(!empty_stats.is_successful());
}

#[test]
fn test_rejection_counts_by_kind() {
    let mut counts = RejectionCounts::default();
    let errors = [
        PacketError::FramingInvalid,
        PacketError::UnknownPacketType {
            name: "X".to_string(),
        },
        PacketError::MissingPairedValue {
            field: "errorNameOrValue".to_string(),
            value_field: "errorCode".to_string(),
        },
        PacketError::FieldCountMismatch {
            expected: 7,
            found: 4,
        },
        PacketError::FieldCountMismatch {
            expected: 7,
            found: 8,
        },
    ];

    for error in &errors {
        counts.record(error.kind());
    }

    assert_eq!(counts.framing_invalid, 1);
    assert_eq!(counts.unknown_packet_type, 1);
    assert_eq!(counts.field_conversion_failed, 1);
    assert_eq!(counts.field_count_mismatch, 2);
    assert_eq!(counts.invalid_repeat_count, 0);
    assert_eq!(counts.total(), 5);
}

#[test]
fn test_parse_stats_serialization() {
    let mut stats = ParseStats::new();
    stats.total_lines = 2;
    stats.record_accepted(PacketType::PositionUpdate);
    stats.record_rejected(RejectionKind::FieldLengthOutOfRange);
    stats.errors.push("Line 2: bad".to_string());

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["records_parsed"], 1);
    assert_eq!(json["records_by_type"]["PositionUpdate"], 1);
    assert_eq!(json["rejections"]["field_length_out_of_range"], 1);
    assert_eq!(json["errors"][0], "Line 2: bad");

    let restored: ParseStats = serde_json::from_value(json).unwrap();
    assert_eq!(restored, stats);
}
