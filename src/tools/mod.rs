// src/tools/mod.rs
//! Whole-tank operations built on the scanner: cutting a time window, extracting channels and
//! printing a per-record summary.

mod cut;
mod extract;
mod sniff;

pub use cut::{cut, TimeWindow, DEFAULT_WINDOW_SECS};
pub use extract::{extract, ScnlFilter, MAX_SCNL_CODE_LEN, WILDCARD};
pub use sniff::{format_record_line, format_samples, sniff, SniffOptions};

use std::io::Write;

use tracing::{info, warn};

use crate::error::{Result, TankError};
use crate::progress::Progress;
use crate::scanner::{AcceptRecord, ScanConfig};
use crate::tank::Tank;
use crate::writer::TankWriter;

/// Scan `tank` with `accept` and copy the accepted records to `writer`.
///
/// Fails with [`TankError::NoRecords`] when nothing is accepted, removing a file the writer
/// created.
pub(crate) fn copy_accepted<W: Write>(
    label: &str,
    tank: &mut Tank,
    accept: &dyn AcceptRecord,
    writer: &mut TankWriter<W>,
) -> Result<usize> {
    let index = tank.scan(ScanConfig::default(), Some(accept))?;
    if index.is_empty() {
        warn!("{}: can not mark any tracebuf in the tank", label);
        writer.remove_output();
        return Err(TankError::NoRecords);
    }
    let mut progress = Progress::new(label, index.len());
    let written = writer.write_index(tank, &index, Some(&mut progress))?;
    progress.finish();
    info!(records = written, bytes = index.total_bytes(), "{} complete", label);
    Ok(written)
}
