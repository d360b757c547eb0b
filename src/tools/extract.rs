// src/tools/extract.rs
use std::io::Write;

use crate::error::{Result, TankError};
use crate::record::TraceHeader;
use crate::scanner::AcceptRecord;
use crate::tank::Tank;
use crate::writer::TankWriter;

/// Longest accepted station/channel/network/location code
pub const MAX_SCNL_CODE_LEN: usize = 8;

/// Code value that leaves a component unrestricted
pub const WILDCARD: &str = "wild";

/// Matches records by exact station, channel, network and location codes.
///
/// Unset components match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScnlFilter {
    station: Option<String>,
    channel: Option<String>,
    network: Option<String>,
    location: Option<String>,
}

impl ScnlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_station(mut self, code: &str) -> Result<Self> {
        self.station = checked_code(code)?;
        Ok(self)
    }

    pub fn with_channel(mut self, code: &str) -> Result<Self> {
        self.channel = checked_code(code)?;
        Ok(self)
    }

    pub fn with_network(mut self, code: &str) -> Result<Self> {
        self.network = checked_code(code)?;
        Ok(self)
    }

    pub fn with_location(mut self, code: &str) -> Result<Self> {
        self.location = checked_code(code)?;
        Ok(self)
    }

    /// True when no component is restricted
    pub fn is_unrestricted(&self) -> bool {
        self.station.is_none()
            && self.channel.is_none()
            && self.network.is_none()
            && self.location.is_none()
    }

    pub fn matches(&self, header: &TraceHeader) -> bool {
        fn component(code: &Option<String>, actual: &str) -> bool {
            code.as_deref().map_or(true, |code| code == actual)
        }
        component(&self.station, &header.station())
            && component(&self.channel, &header.channel())
            && component(&self.network, &header.network())
            && component(&self.location, &header.location())
    }
}

fn checked_code(code: &str) -> Result<Option<String>> {
    if code.len() > MAX_SCNL_CODE_LEN {
        return Err(TankError::InvalidCode(format!(
            "{} is longer than {} characters",
            code, MAX_SCNL_CODE_LEN
        )));
    }
    Ok((code != WILDCARD).then(|| code.to_string()))
}

impl AcceptRecord for ScnlFilter {
    fn accept(&self, header: &TraceHeader) -> bool {
        self.matches(header)
    }
}

/// Copy the records of `tank` matching `filter` to `writer`, in tank order.
///
/// At least one code must be set. Returns [`TankError::NoRecords`] when no record matches.
pub fn extract<W: Write>(tank: &mut Tank, filter: &ScnlFilter, writer: &mut TankWriter<W>) -> Result<usize> {
    if filter.is_unrestricted() {
        return Err(TankError::InvalidArgument(
            "at least one of station, channel, network or location is required".to_string(),
        ));
    }
    super::copy_accepted("extract", tank, filter, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TraceBuf;
    use crate::samples::Samples;

    fn header(sta: &str, chan: &str, net: &str, loc: &str) -> TraceHeader {
        TraceBuf::new().with_scnl(sta, chan, net, loc).header()
    }

    #[test]
    fn test_codes() {
        let filter = ScnlFilter::new()
            .with_station("TATO")
            .unwrap()
            .with_channel(WILDCARD)
            .unwrap();
        assert!(!filter.is_unrestricted());
        assert!(filter.matches(&header("TATO", "HHZ", "TW", "00")));
        assert!(filter.matches(&header("TATO", "HHN", "TW", "00")));
        assert!(!filter.matches(&header("TAT", "HHZ", "TW", "00")));

        assert!(ScnlFilter::new().with_network(WILDCARD).unwrap().is_unrestricted());
        assert!(matches!(
            ScnlFilter::new().with_location("123456789"),
            Err(TankError::InvalidCode(_))
        ));
        assert!(ScnlFilter::new().with_location("12345678").is_ok());
    }

    #[test]
    fn test_extract() {
        let mut bytes = Vec::new();
        for sta in ["A", "B", "A"] {
            bytes.extend_from_slice(
                &TraceBuf::new()
                    .with_scnl(sta, "HHZ", "TW", "--")
                    .with_samples(Samples::I16(vec![1]))
                    .to_bytes(),
            );
        }
        let mut tank = Tank::from_bytes(bytes);
        let mut writer = TankWriter::new(Vec::new());

        let none = ScnlFilter::new();
        assert!(extract(&mut tank, &none, &mut writer).is_err());

        let only_a = ScnlFilter::new().with_station("A").unwrap();
        assert_eq!(extract(&mut tank, &only_a, &mut writer).unwrap(), 2);
        assert_eq!(writer.bytes_written(), 2 * 66);
    }
}
