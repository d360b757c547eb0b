// src/scanner/index.rs
use smallvec::SmallVec;

use crate::record::RecordDescriptor;

/// A resynchronization: bytes skipped before a valid record was found again
#[derive(Debug, Clone, PartialEq)]
pub struct ResyncEvent {
    /// Offset of the recovered record
    pub offset: usize,
    /// Bytes skipped since the last valid record
    pub skipped: usize,
    /// `STA.CHAN.NET.LOC` of the recovered record
    pub scnl: String,
    pub start_time: f64,
    pub duration: f64,
}

/// Per-class counts of what happened during a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Records that ended up in the index
    pub accepted: usize,
    /// Valid records the acceptance predicate turned down
    pub filtered: usize,
    /// Valid records dropped for exceeding the size bound
    pub oversized: usize,
    /// Bytes skipped while resynchronizing, trailing garbage included
    pub bytes_skipped: usize,
    /// Bytes at the end of the region that never resynchronized
    pub trailing_bytes: usize,
}

/// Result of scanning a tank
#[derive(Debug, Clone, Default)]
pub struct TankIndex {
    pub records: Vec<RecordDescriptor>,
    pub resyncs: SmallVec<[ResyncEvent; 4]>,
    pub stats: ScanStats,
}

impl TankIndex {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordDescriptor> {
        self.records.iter()
    }

    /// Sum of the sizes of all indexed records
    pub fn total_bytes(&self) -> usize {
        self.records.iter().map(|r| r.size).sum()
    }
}

impl<'a> IntoIterator for &'a TankIndex {
    type Item = &'a RecordDescriptor;
    type IntoIter = std::slice::Iter<'a, RecordDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
