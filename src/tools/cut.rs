// src/tools/cut.rs
use std::io::Write;

use crate::error::{Result, TankError};
use crate::record::TraceHeader;
use crate::scanner::AcceptRecord;
use crate::tank::Tank;
use crate::time::parse_timestamp;
use crate::writer::TankWriter;

/// Window length used when only a start time is given
pub const DEFAULT_WINDOW_SECS: f64 = 600.0;

/// Closed time window in epoch seconds; a record overlapping it in any way is kept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !(start <= end) {
            return Err(TankError::InvalidArgument(format!(
                "window end {} precedes start {}",
                end, start
            )));
        }
        Ok(TimeWindow { start, end })
    }

    pub fn from_duration(start: f64, secs: f64) -> Result<Self> {
        Self::new(start, start + secs)
    }

    /// Build a window from `YYYYMMDDHHMMSS` strings.
    ///
    /// An explicit end wins over `duration`; with neither, the window spans
    /// [`DEFAULT_WINDOW_SECS`].
    pub fn parse(start: &str, end: Option<&str>, duration: Option<f64>) -> Result<Self> {
        let start = parse_window_time(start)?;
        match (end, duration) {
            (Some(end), _) => Self::new(start, parse_window_time(end)?),
            (None, Some(secs)) if secs == 0.0 => Err(TankError::InvalidArgument(
                "an end time or a nonzero duration is required".to_string(),
            )),
            (None, secs) => Self::from_duration(start, secs.unwrap_or(DEFAULT_WINDOW_SECS)),
        }
    }

    pub fn overlaps(&self, header: &TraceHeader) -> bool {
        !(header.end_time < self.start || header.start_time > self.end)
    }
}

fn parse_window_time(text: &str) -> Result<f64> {
    if text.len() != 14 {
        return Err(TankError::InvalidTimestamp(format!(
            "{} is not in YYYYMMDDHHMMSS format",
            text
        )));
    }
    parse_timestamp(text)
}

impl AcceptRecord for TimeWindow {
    fn accept(&self, header: &TraceHeader) -> bool {
        self.overlaps(header)
    }
}

/// Copy the records of `tank` overlapping `window` to `writer`, in tank order.
///
/// Returns [`TankError::NoRecords`] when no record overlaps the window.
pub fn cut<W: Write>(tank: &mut Tank, window: &TimeWindow, writer: &mut TankWriter<W>) -> Result<usize> {
    super::copy_accepted("cut", tank, window, writer)
}
