// src/scanner/mod.rs
//! Tank scanning.
//!
//! The [`Scanner`] walks a tank region record by record. Each candidate offset is handed to
//! the normalizer; a candidate that fails validation is skipped one byte at a time until a
//! valid record boundary shows up again. Valid records are byte-swapped to host order in
//! place and, unless the size bound or the caller's predicate rejects them, indexed.
//!
//! ```
//! use tank_rs::{scan_tank, ByteOrder, Samples, TraceBuf};
//!
//! let record = TraceBuf::new()
//!     .with_scnl("AB", "CH", "NW", "00")
//!     .with_samples(Samples::I32(vec![1, 2]))
//!     .with_byte_order(ByteOrder::Big)
//!     .to_bytes();
//!
//! let mut tank = record.to_vec();
//! tank.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
//! tank.extend_from_slice(&record);
//!
//! let index = scan_tank(&mut tank, None).unwrap();
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.records[1].offset, 72 + 3);
//! assert_eq!(index.resyncs[0].skipped, 3);
//! ```

mod config;
mod index;
mod predicate;

pub use config::ScanConfig;
pub use index::{ResyncEvent, ScanStats, TankIndex};
pub use predicate::AcceptRecord;

use tracing::{debug, info, warn};

use crate::error::{Result, TankError};
use crate::normalize::normalize_record;
use crate::record::RecordDescriptor;

/// Scan `tank` with the default configuration
pub fn scan_tank(tank: &mut [u8], accept: Option<&dyn AcceptRecord>) -> Result<TankIndex> {
    Scanner::new(ScanConfig::default()).scan(tank, accept)
}

/// Drives the cursor across a tank region
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Scanner { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Index every valid record in `tank`, normalizing each one in place.
    ///
    /// Records rejected by `accept` are normalized but not indexed. Fails only when the
    /// host byte order cannot be determined or the index cannot grow; partial results are
    /// dropped in both cases.
    pub fn scan(&self, tank: &mut [u8], accept: Option<&dyn AcceptRecord>) -> Result<TankIndex> {
        let end = tank.len();
        let max_record_size = self.config.max_record_size;
        let mut index = TankIndex::default();

        let mut records: Vec<RecordDescriptor> = Vec::new();
        if end > 0 {
            records
                .try_reserve_exact(self.config.initial_capacity)
                .map_err(|_| TankError::IndexGrowth {
                    requested: self.config.initial_capacity,
                })?;
        }

        let mut cursor = 0usize;
        let mut skipped = 0usize;

        while cursor < end {
            let normalized = match normalize_record(&mut tank[cursor..], max_record_size) {
                Ok(normalized) => normalized,
                Err(e) if e.is_recoverable() => {
                    if cursor + 1 < end {
                        cursor += 1;
                        skipped += 1;
                        continue;
                    }
                    index.stats.trailing_bytes = skipped + 1;
                    index.stats.bytes_skipped += skipped + 1;
                    debug!(
                        trailing = skipped + 1,
                        "reached end of tank without finding another tracebuf"
                    );
                    break;
                }
                Err(e) => return Err(e),
            };

            let header = &normalized.header;
            if skipped > 0 {
                let duration = header.end_time - header.start_time;
                info!(
                    skipped,
                    offset = cursor,
                    scnl = %header.scnl(),
                    start_time = header.start_time,
                    duration,
                    "shift total {} bytes, found the next correct tracebuf",
                    skipped
                );
                index.resyncs.push(ResyncEvent {
                    offset: cursor,
                    skipped,
                    scnl: header.scnl(),
                    start_time: header.start_time,
                    duration,
                });
                index.stats.bytes_skipped += skipped;
                skipped = 0;
            }

            let offset = cursor;
            cursor += normalized.size;

            if normalized.size > max_record_size {
                warn!(
                    size = normalized.size,
                    max = max_record_size,
                    "tracebuf too large, skipping"
                );
                index.stats.oversized += 1;
                continue;
            }

            if let Some(accept) = accept {
                if !accept.accept(header) {
                    index.stats.filtered += 1;
                    continue;
                }
            }

            if records.len() == records.capacity() {
                let additional = records.capacity().max(1);
                records
                    .try_reserve_exact(additional)
                    .map_err(|_| TankError::IndexGrowth {
                        requested: records.capacity() + additional,
                    })?;
            }
            records.push(RecordDescriptor {
                offset,
                size: normalized.size,
                time: header.end_time,
                original_order: normalized.original_order,
            });
        }

        if records.is_empty() {
            records = Vec::new();
        }
        index.stats.accepted = records.len();
        index.records = records;
        Ok(index)
    }
}
