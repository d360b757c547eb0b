// src/record/descriptor.rs
use std::ops::Range;

use crate::types::DataFamily;

/// Location of one accepted record inside a scanned tank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordDescriptor {
    /// Byte distance from the start of the scanned region
    pub offset: usize,
    /// Header plus payload size in bytes
    pub size: usize,
    /// End time of the record, epoch seconds
    pub time: f64,
    /// Encoding family the record carried before normalization
    pub original_order: DataFamily,
}

impl RecordDescriptor {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }

    pub fn end_offset(&self) -> usize {
        self.offset + self.size
    }
}
