// src/record/header.rs
use std::borrow::Cow;

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};

use crate::error::{Result, StructuralFault};
use crate::types::{ByteOrder, Datatype};

/// Size in bytes of the fixed TRACEBUF2 header
pub const HEADER_SIZE: usize = 64;

/// Decoded TRACEBUF2 header.
///
/// Numeric fields hold plain values; the fixed-width code fields keep their raw bytes so a
/// header can be written back bit-exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceHeader {
    pub pinno: i32,
    pub nsamp: i32,
    /// Time of the first sample, epoch seconds
    pub start_time: f64,
    /// Time of the last sample, epoch seconds
    pub end_time: f64,
    pub sample_rate: f64,
    pub station: [u8; 7],
    pub network: [u8; 9],
    pub channel: [u8; 4],
    pub location: [u8; 3],
    pub version: [u8; 2],
    pub datatype: [u8; 3],
    pub quality: [u8; 2],
    pub pad: [u8; 2],
    /// Only carried by version 2.1 headers, where it overlays quality and pad
    pub conversion_factor: Option<f32>,
}

impl TraceHeader {
    pub const SIZE: usize = HEADER_SIZE;

    pub const PINNO_OFFSET: usize = 0;
    pub const NSAMP_OFFSET: usize = 4;
    pub const START_TIME_OFFSET: usize = 8;
    pub const END_TIME_OFFSET: usize = 16;
    pub const SAMPLE_RATE_OFFSET: usize = 24;
    pub const STATION_OFFSET: usize = 32;
    pub const NETWORK_OFFSET: usize = 39;
    pub const CHANNEL_OFFSET: usize = 48;
    pub const LOCATION_OFFSET: usize = 52;
    pub const VERSION_OFFSET: usize = 55;
    pub const DATATYPE_OFFSET: usize = 57;
    pub const QUALITY_OFFSET: usize = 60;
    pub const PAD_OFFSET: usize = 62;
    pub const CONVERSION_FACTOR_OFFSET: usize = 60;

    pub const VERSION_MAJOR: u8 = b'2';
    pub const VERSION_MINOR_20: u8 = b'0';
    pub const VERSION_MINOR_21: u8 = b'1';

    /// Decode a header from the start of `bytes`, reading numeric fields in `order`
    pub fn decode(bytes: &[u8], order: ByteOrder) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(StructuralFault::Truncated { available: bytes.len() }.into());
        }
        let bytes = &bytes[..Self::SIZE];
        Ok(match order {
            ByteOrder::Little => Self::decode_with::<LittleEndian>(bytes),
            ByteOrder::Big => Self::decode_with::<BigEndian>(bytes),
        })
    }

    fn decode_with<E: Endian>(b: &[u8]) -> Self {
        let version = copy_array(b, Self::VERSION_OFFSET);
        let conversion_factor = if Self::version_has_conversion_factor(version) {
            Some(E::read_f32(&b[Self::CONVERSION_FACTOR_OFFSET..]))
        } else {
            None
        };

        TraceHeader {
            pinno: E::read_i32(&b[Self::PINNO_OFFSET..]),
            nsamp: E::read_i32(&b[Self::NSAMP_OFFSET..]),
            start_time: E::read_f64(&b[Self::START_TIME_OFFSET..]),
            end_time: E::read_f64(&b[Self::END_TIME_OFFSET..]),
            sample_rate: E::read_f64(&b[Self::SAMPLE_RATE_OFFSET..]),
            station: copy_array(b, Self::STATION_OFFSET),
            network: copy_array(b, Self::NETWORK_OFFSET),
            channel: copy_array(b, Self::CHANNEL_OFFSET),
            location: copy_array(b, Self::LOCATION_OFFSET),
            version,
            datatype: copy_array(b, Self::DATATYPE_OFFSET),
            quality: copy_array(b, Self::QUALITY_OFFSET),
            pad: copy_array(b, Self::PAD_OFFSET),
            conversion_factor,
        }
    }

    /// Encode this header into the first [`TraceHeader::SIZE`] bytes of `out`
    pub fn encode_into(&self, out: &mut [u8], order: ByteOrder) -> Result<()> {
        if out.len() < Self::SIZE {
            return Err(StructuralFault::Truncated { available: out.len() }.into());
        }
        let out = &mut out[..Self::SIZE];
        match order {
            ByteOrder::Little => self.encode_with::<LittleEndian>(out),
            ByteOrder::Big => self.encode_with::<BigEndian>(out),
        }
        Ok(())
    }

    pub fn to_bytes(&self, order: ByteOrder) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        match order {
            ByteOrder::Little => self.encode_with::<LittleEndian>(&mut bytes),
            ByteOrder::Big => self.encode_with::<BigEndian>(&mut bytes),
        }
        bytes
    }

    fn encode_with<E: Endian>(&self, b: &mut [u8]) {
        E::write_i32(&mut b[Self::PINNO_OFFSET..], self.pinno);
        E::write_i32(&mut b[Self::NSAMP_OFFSET..], self.nsamp);
        E::write_f64(&mut b[Self::START_TIME_OFFSET..], self.start_time);
        E::write_f64(&mut b[Self::END_TIME_OFFSET..], self.end_time);
        E::write_f64(&mut b[Self::SAMPLE_RATE_OFFSET..], self.sample_rate);
        b[Self::STATION_OFFSET..Self::STATION_OFFSET + 7].copy_from_slice(&self.station);
        b[Self::NETWORK_OFFSET..Self::NETWORK_OFFSET + 9].copy_from_slice(&self.network);
        b[Self::CHANNEL_OFFSET..Self::CHANNEL_OFFSET + 4].copy_from_slice(&self.channel);
        b[Self::LOCATION_OFFSET..Self::LOCATION_OFFSET + 3].copy_from_slice(&self.location);
        b[Self::VERSION_OFFSET..Self::VERSION_OFFSET + 2].copy_from_slice(&self.version);
        b[Self::DATATYPE_OFFSET..Self::DATATYPE_OFFSET + 3].copy_from_slice(&self.datatype);
        b[Self::QUALITY_OFFSET..Self::QUALITY_OFFSET + 2].copy_from_slice(&self.quality);
        b[Self::PAD_OFFSET..Self::PAD_OFFSET + 2].copy_from_slice(&self.pad);
        if let Some(factor) = self.conversion_factor {
            E::write_f32(&mut b[Self::CONVERSION_FACTOR_OFFSET..], factor);
        }
    }

    fn version_has_conversion_factor(version: [u8; 2]) -> bool {
        version == [Self::VERSION_MAJOR, Self::VERSION_MINOR_21]
    }

    /// Whether this header uses the version 2.1 layout
    pub fn is_v21(&self) -> bool {
        Self::version_has_conversion_factor(self.version)
    }

    /// The parsed datatype tag, if it is one of the eight known codes
    pub fn datatype(&self) -> Option<Datatype> {
        Datatype::from_tag([self.datatype[0], self.datatype[1]])
    }

    pub fn set_datatype(&mut self, datatype: Datatype) {
        let tag = datatype.tag();
        self.datatype[0] = tag[0];
        self.datatype[1] = tag[1];
    }

    /// Total bytes of header plus payload, or None for a negative sample count or unknown tag
    pub fn record_size(&self) -> Option<usize> {
        let width = self.datatype()?.sample_width();
        let nsamp = usize::try_from(self.nsamp).ok()?;
        nsamp.checked_mul(width)?.checked_add(Self::SIZE)
    }

    pub fn station(&self) -> Cow<'_, str> {
        code_str(&self.station)
    }

    pub fn network(&self) -> Cow<'_, str> {
        code_str(&self.network)
    }

    pub fn channel(&self) -> Cow<'_, str> {
        code_str(&self.channel)
    }

    pub fn location(&self) -> Cow<'_, str> {
        code_str(&self.location)
    }

    /// Channel identity in `STA.CHAN.NET.LOC` form
    pub fn scnl(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.station(),
            self.channel(),
            self.network(),
            self.location()
        )
    }
}

impl Default for TraceHeader {
    fn default() -> Self {
        TraceHeader {
            pinno: 0,
            nsamp: 0,
            start_time: 0.0,
            end_time: 0.0,
            sample_rate: 0.0,
            station: [0; 7],
            network: [0; 9],
            channel: [0; 4],
            location: [0; 3],
            version: [Self::VERSION_MAJOR, Self::VERSION_MINOR_20],
            datatype: [0; 3],
            quality: [0; 2],
            pad: [0; 2],
            conversion_factor: None,
        }
    }
}

/// Copy `code` into a NUL-padded fixed field, truncating so the last byte stays NUL
pub fn encode_code<const N: usize>(code: &str) -> [u8; N] {
    let mut field = [0u8; N];
    let len = code.len().min(N.saturating_sub(1));
    field[..len].copy_from_slice(&code.as_bytes()[..len]);
    field
}

fn code_str(field: &[u8]) -> Cow<'_, str> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end])
}

fn copy_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}
