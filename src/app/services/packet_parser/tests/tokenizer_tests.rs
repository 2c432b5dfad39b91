//! Tests for line splitting, framing and tokenization

use super::*;
use crate::app::services::packet_parser::error::PacketError;
use crate::app::services::packet_parser::tokenizer::{split_lines, strip_framing, tokenize_line};

#[test]
fn test_split_lines() {
    let lines: Vec<&str> = split_lines("a\nb\n").collect();
    assert_eq!(lines, vec!["a", "b"]);

    let lines: Vec<&str> = split_lines("a\n\nb").collect();
    assert_eq!(lines, vec!["a", "", "b"]);

    assert_eq!(split_lines("").count(), 0);
}

#[test]
fn test_split_lines_keeps_carriage_return() {
    let lines: Vec<&str> = split_lines("a\r\nb").collect();
    assert_eq!(lines, vec!["a\r", "b"]);
}

#[test]
fn test_strip_framing() {
    assert_eq!(strip_framing("+IN,Error$"), Ok("IN,Error"));
    assert_eq!(strip_framing("+$"), Ok(""));

    for line in ["", "+", "$", "IN,Error$", "+IN,Error", "AABBAA", "+IN,Error$\r", " +IN$"] {
        assert_eq!(
            strip_framing(line),
            Err(PacketError::FramingInvalid),
            "expected '{}' to fail framing",
            line.escape_debug()
        );
    }
}

#[test]
fn test_tokenize_line() {
    let fields = tokenize_line(DEVICE_INFO_LINE).unwrap();
    assert_eq!(
        fields,
        vec!["IN", "DeviceInfo", TEST_IMEI, "86", "5600", "2021-01-14T15:05:10", "0035"]
    );
}

#[test]
fn test_tokenize_line_keeps_empty_fields() {
    let fields = tokenize_line("+IN,DeviceInfo,,$").unwrap();
    assert_eq!(fields, vec!["IN", "DeviceInfo", "", ""]);
}
