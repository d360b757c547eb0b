// src/scanner/config.rs
use crate::MAX_TRACEBUF_SIZE;

/// Tunables for a tank scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Largest record, header included, the scanner will index.
    ///
    /// Bounds both the normalizer's sample-count check and the scanner's size check.
    pub max_record_size: usize,
    /// Number of descriptors reserved before the first record is found
    pub initial_capacity: usize,
}

impl ScanConfig {
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        ScanConfig {
            max_record_size: MAX_TRACEBUF_SIZE,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }

    pub fn with_max_record_size(mut self, max_record_size: usize) -> Self {
        self.max_record_size = max_record_size;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}
