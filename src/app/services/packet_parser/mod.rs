//! Packet parser for scooter telemetry logs
//!
//! This module turns a batch payload of newline-separated telemetry packets
//! into structured records. Each line is framed by `+` and `$` and carries
//! comma-separated fields whose layout is chosen by the packet type in the
//! second field. Lines that break any rule are skipped as noise.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`field_parsers`] - Strict value converters (integers, IMEI, timestamps)
//! - [`schema`] - Field definitions and the packet schema registry
//! - [`tokenizer`] - Line splitting, framing checks and field tokenization
//! - [`flattener`] - Expansion of repeat groups against a line's counts
//! - [`validator`] - Field count and length checks
//! - [`record_parser`] - Conversion of validated fields into a record
//! - [`parser`] - Batch orchestration
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use scooter_telemetry::app::services::packet_parser::PacketParser;
//!
//! let payload = "+IN,DeviceInfo,860861040012977,86,5600,2021-01-14T15:05:10,0035$\n";
//! let result = PacketParser::default().parse(payload);
//!
//! assert_eq!(result.records.len(), 1);
//! println!("Parsed {} records from {} lines",
//!          result.stats.records_parsed,
//!          result.stats.total_lines);
//! ```

pub mod error;
pub mod field_parsers;
pub mod flattener;
pub mod parser;
pub mod record_parser;
pub mod schema;
pub mod stats;
pub mod tokenizer;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use error::{ConversionError, PacketError, RejectionKind};
pub use parser::{PacketParser, parse_device_information};
pub use schema::{Converter, FieldDefinition, FieldName, SchemaRegistry};
pub use stats::{ParseResult, ParseStats, RejectionCounts};
