// src/error.rs
use std::io;
use thiserror::Error;

/// Reasons a candidate header fails the structural checks of the normalizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralFault {
    /// Fewer than a full header's worth of bytes remain in the region
    #[error("only {available} bytes left for a header")]
    Truncated { available: usize },
    /// The two-character datatype tag is not one of i2/i4/s2/s4/f4/f8/t4/t8
    #[error("unknown datatype {:?}", String::from_utf8_lossy(.0))]
    UnknownDatatype([u8; 2]),
    /// Sample count is negative or larger than the record size bound allows
    #[error("bad number of samples={nsamp} (limit {limit})")]
    BadSampleCount { nsamp: i32, limit: usize },
    /// Payload declared by the header runs past the end of the region
    #[error("payload needs {needed} bytes, {available} available")]
    PayloadOverrun { needed: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum TankError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid tracebuf: {0}")]
    Structural(#[from] StructuralFault),

    #[error("Inconsistent header for {scnl}: endtime {end_time:.4} not within 5 samples of computed {expected_end:.4}")]
    Semantic {
        scnl: String,
        end_time: f64,
        expected_end: f64,
    },

    #[error("Could not determine host byte order")]
    UnknownHostByteOrder,

    #[error("Could not grow record index to {requested} entries")]
    IndexGrowth { requested: usize },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid SCNL code: {0}")]
    InvalidCode(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Can not mark any tracebuf in the tank")]
    NoRecords,

    #[error("Writer closed")]
    WriterClosed,
}

impl TankError {
    /// Whether the scanner may skip past this failure and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TankError::Structural(_) | TankError::Semantic { .. })
    }

    /// Negative status code of the failure class.
    ///
    /// Structural and semantic validation failures keep distinct codes even though the
    /// scanner treats both the same way.
    pub fn status(&self) -> i32 {
        match self {
            TankError::Structural(_) => -1,
            TankError::Semantic { .. } => -2,
            TankError::IndexGrowth { .. } => -3,
            TankError::UnknownHostByteOrder => -4,
            _ => -5,
        }
    }
}

pub type Result<T> = std::result::Result<T, TankError>;
