//! Test utilities and fixtures for packet parser testing
//!
//! This module provides sample packet lines, mixed payloads and helper
//! functions used across the different test modules.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::app::models::{FieldValue, Record};

mod schema_tests;
mod stats_tests;
mod tokenizer_tests;

pub const TEST_IMEI: &str = "860861040012977";

/// A valid DeviceInfo line
pub const DEVICE_INFO_LINE: &str =
    "+IN,DeviceInfo,860861040012977,86,5600,2021-01-14T15:05:10,0035$";

/// A valid Error line with four error entries
pub const ERROR_LINE: &str = "+IN,Error,860861040012977,4,5,NoBattery,7,ECUFailure,8,Reboot,10,IotError,2021-01-14T19:05:10,0039$";

/// A valid Error line with an empty error list
pub const EMPTY_ERROR_LINE: &str = "+IN,Error,860861040012977,0,2021-01-14T19:05:10,0039$";

/// Build a DeviceInfo line from its variable fields
pub fn create_device_info_line(imei: &str, battery: &str, odometer: &str, time: &str) -> String {
    format!(
        "+IN,DeviceInfo,{},{},{},{},0035$",
        imei, battery, odometer, time
    )
}

/// Mixed payload of valid packets and noise
///
/// Contains 22 lines of which 7 parse: three DeviceInfo packets and four
/// Error packets.
pub fn create_mixed_payload() -> String {
    r#"+IN,DeviceInfo,860861040012977,86,5600,2021-01-14T15:05:10,0035$
AABBAA
+IN,DeviceInfo,860861040012977,34,5612,2021-01-14T18:30:10,0036$
CCDDEE
+IN,DeviceInfo,860861040012977,3,5623,2021-01-14T23:59:10,0037$
FFGGHH
NEXT LINE IS NOT A DeviceInfo Packet
+IN,NotDeviceInfo,860861040012978,3,5623,2021-01-14T23:59:10,0038$
NEXT LINE HAS INVALID IMEI field length < minLength
+IN,DeviceInfo,8,3,5623,2021-01-14T23:59:10,0039$
NEXT LINE HAS INVALID Date field type
+IN,DeviceInfo,860861040012978,3,5623,2021-01-14xT23:59:10,0040$
NEXT LINE HAS INVALID battery percentage field length > maxLength
+IN,DeviceInfo,860861040012978,3000,5623,2021-01-14T23:59:10,0041$
NEXT LINE HAS less than required number of fields
+IN,DeviceInfo,860861040012978,0041$
NEXT LINE HAS more than required number of fields
+IN,DeviceInfo,860861040012978,3,5623,2021-01-14T23:59:10,0041,0042$
+IN,Error,860861040012977,2,5,NoBattery,7,ECUFailure,2021-01-14T15:06:18,0036$
+IN,Error,860861040012977,1,7,ECUFailure,2021-01-14T15:09:18,0037$
+IN,Error,860861040012977,4,5,NoBattery,7,ECUFailure,8,Reboot,10,IotError,2021-01-14T19:05:10,0039$
+IN,Error,860861040012977,0,2021-01-14T19:05:10,0039$
"#
    .to_string()
}

/// Local wall-clock instant, independent of the test machine's timezone
pub fn local_time(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap();
    Local.from_local_datetime(&naive).earliest().unwrap()
}

/// Shorthand for a text field value
pub fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

/// Field names of a record, in record order
pub fn field_names(record: &Record) -> Vec<&str> {
    record.field_names().collect()
}
