// src/writer/sync_writer.rs
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::progress::Progress;
use crate::scanner::TankIndex;
use crate::tank::Tank;

/// Appends whole TRACEBUF2 records to a sink, typically a new tank file
pub struct TankWriter<W: Write> {
    sink: W,
    path: Option<PathBuf>,
    records_written: usize,
    bytes_written: usize,
}

impl TankWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(TankWriter {
            sink: BufWriter::new(file),
            path: Some(path.to_path_buf()),
            records_written: 0,
            bytes_written: 0,
        })
    }
}

impl<W: Write> TankWriter<W> {
    pub fn new(sink: W) -> Self {
        TankWriter {
            sink,
            path: None,
            records_written: 0,
            bytes_written: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.sink.write_all(record)?;
        self.records_written += 1;
        self.bytes_written += record.len();
        Ok(())
    }

    /// Copy every indexed record of `tank` in index order.
    ///
    /// When the writer owns a file and a write fails, the partial file is removed.
    pub fn write_index(
        &mut self,
        tank: &Tank,
        index: &TankIndex,
        progress: Option<&mut Progress>,
    ) -> Result<usize> {
        if let Err(e) = self.copy_records(tank, index, progress) {
            warn!(error = %e, "write failed");
            self.remove_output();
            return Err(e);
        }
        Ok(index.len())
    }

    /// Delete the output file this writer created, if any
    pub fn remove_output(&self) {
        if let Some(path) = &self.path {
            debug!(path = %path.display(), "removing output file");
            if let Err(e) = fs::remove_file(path) {
                debug!(error = %e, "could not remove output file");
            }
        }
    }

    fn copy_records(
        &mut self,
        tank: &Tank,
        index: &TankIndex,
        mut progress: Option<&mut Progress>,
    ) -> Result<()> {
        for desc in index {
            self.write_record(tank.record(desc)?)?;
            if let Some(progress) = progress.as_deref_mut() {
                progress.inc();
            }
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.sink)
    }
}

impl<W: Write> std::fmt::Debug for TankWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TankWriter")
            .field("path", &self.path)
            .field("records_written", &self.records_written)
            .field("bytes_written", &self.bytes_written)
            .finish()
    }
}
