// src/time.rs
//! Epoch second conversions used by the command line tools.
//!
//! Timestamps print as `YYYY/MM/DD_HH:MM:SS.ss` and window boundaries parse from
//! `YYYYMMDDHHMMSS`, both in UTC.

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

use crate::error::{Result, TankError};

/// Format epoch seconds as `YYYY/MM/DD_HH:MM:SS.ss`
pub fn format_timestamp(epoch: f64) -> Result<String> {
    if !epoch.is_finite() {
        return Err(TankError::InvalidTimestamp(epoch.to_string()));
    }
    let whole = epoch.floor();
    let fraction = epoch - whole;
    let dt = DateTime::from_timestamp(whole as i64, 0)
        .ok_or_else(|| TankError::InvalidTimestamp(epoch.to_string()))?;

    Ok(format!(
        "{:04}/{:02}/{:02}_{:02}:{:02}:{:05.2}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second() as f64 + fraction
    ))
}

/// Parse a `YYYYMMDDHHMMSS` UTC timestamp into epoch seconds.
///
/// The seconds may carry a `.fraction` of digits, so `20240101000000.5` is accepted.
pub fn parse_timestamp(text: &str) -> Result<f64> {
    let invalid = || TankError::InvalidTimestamp(text.to_string());

    if text.len() < 14 || !text.is_char_boundary(12) {
        return Err(invalid());
    }
    let field = |range: std::ops::Range<usize>| -> Result<u32> {
        let part = text.get(range).ok_or_else(invalid)?;
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse().map_err(|_| invalid())
    };

    let year = field(0..4)? as i32;
    let month = field(4..6)?;
    let day = field(6..8)?;
    let hour = field(8..10)?;
    let minute = field(10..12)?;
    let seconds_text = &text[12..];
    if !is_seconds_field(seconds_text) {
        return Err(invalid());
    }
    let seconds: f64 = seconds_text.parse().map_err(|_| invalid())?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(invalid());
    }

    let dt = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or_else(invalid)?
        .and_utc();
    Ok(dt.timestamp() as f64 + seconds)
}

/// Two digits, optionally followed by `.` and at least one more digit
fn is_seconds_field(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || !bytes[..2].iter().all(u8::is_ascii_digit) {
        return false;
    }
    match &bytes[2..] {
        [] => true,
        [b'.', fraction @ ..] => !fraction.is_empty() && fraction.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}
