//! Start-time parsing and overlay text formatting.
//!
//! Both patterns are fixed and locale independent:
//! - input: `YYYY-MM-DD HH:MM:SS`
//! - overlay: `YYYY/MM/DD HH:MM:SS`

use chrono::NaiveDateTime;
use photostamp_common::error::{PhotostampError, PhotostampResult};

/// `chrono` pattern accepted for the start time.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `chrono` pattern drawn onto every photo.
pub const STAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Human-readable shape of [`START_TIME_FORMAT`], used in error messages.
pub const START_TIME_HINT: &str = "YYYY-MM-DD HH:MM:SS";

/// Parse the start time given on the command line.
///
/// The string must have the exact `YYYY-MM-DD HH:MM:SS` shape (every field
/// zero padded) and name a real calendar date and clock time.
pub fn parse_start_time(input: &str) -> PhotostampResult<NaiveDateTime> {
    let input = input.trim();
    if !has_start_time_shape(input) {
        return Err(PhotostampError::config(format!(
            "start date time {input:?} must match {START_TIME_HINT}"
        )));
    }

    NaiveDateTime::parse_from_str(input, START_TIME_FORMAT).map_err(|e| {
        PhotostampError::config(format!("start date time {input:?} is not valid: {e}"))
    })
}

/// Render a timestamp the way it appears on the photo.
pub fn format_stamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(STAMP_FORMAT).to_string()
}

fn has_start_time_shape(input: &str) -> bool {
    const SHAPE: &[u8] = b"dddd-dd-dd dd:dd:dd";

    let bytes = input.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE).all(|(b, s)| match s {
            b'd' => b.is_ascii_digit(),
            other => b == other,
        })
}
