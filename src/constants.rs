//! Application constants for the scooter telemetry parser
//!
//! This module contains the wire-format markers, field positions, timestamp
//! formats and default values used throughout the parser and the CLI.

// =============================================================================
// Line Wire Format
// =============================================================================

/// First character of every packet line
pub const START_CHAR: char = '+';

/// Last character of every packet line
pub const END_CHAR: char = '$';

/// Separator between raw fields inside a packet line
pub const FIELD_DELIMITER: char = ',';

/// Separator between packet lines in a payload
pub const LINE_SEPARATOR: char = '\n';

/// Raw field position holding the packet type name used for schema lookup
pub const PACKET_TYPE_FIELD_INDEX: usize = 1;

// =============================================================================
// Packet Type Names
// =============================================================================

/// Packet type names as they appear on the wire
pub mod packet_types {
    /// Periodic device status report
    pub const DEVICE_INFO: &str = "DeviceInfo";

    /// Position report, same layout as device info
    pub const POSITION_UPDATE: &str = "PositionUpdate";

    /// Error report with a variable number of error code/name pairs
    pub const ERROR: &str = "Error";

    /// All packet types known to the schema registry
    pub const ALL: &[&str] = &[DEVICE_INFO, POSITION_UPDATE, ERROR];
}

// =============================================================================
// Value Formats
// =============================================================================

/// Timestamp formats accepted for time fields (local wall-clock, no zone)
pub const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Unit appended to the battery level value
pub const BATTERY_UNIT: &str = "%";

/// Unit appended to the odometer value
pub const ODOMETER_UNIT: &str = "km";

// =============================================================================
// Defaults
// =============================================================================

/// Maximum number of rejection messages kept in parse statistics
pub const DEFAULT_MAX_RECORDED_ERRORS: usize = 100;

/// Success rate (percent) above which a parse run is considered healthy
pub const SUCCESS_RATE_THRESHOLD: f64 = 90.0;

/// Log target used when building the default tracing filter
pub const LOG_TARGET: &str = "scooter_telemetry";

/// Configuration file name looked up in the user config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name inside the user config directory
pub const APP_DIR_NAME: &str = "scooter_telemetry";
