// src/tank.rs
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

#[cfg(feature = "mmap")]
use memmap2::{MmapMut, MmapOptions};

use crate::error::{Result, TankError};
use crate::record::{RecordDescriptor, TraceHeader};
use crate::samples::Samples;
use crate::scanner::{AcceptRecord, ScanConfig, Scanner, TankIndex};
use crate::utils::host_byte_order;

enum TankData {
    Owned(Vec<u8>),
    #[cfg(feature = "mmap")]
    Mapped(MmapMut),
}

/// The bytes of one tank file, writable so records can be normalized in place
pub struct Tank {
    data: TankData,
    path: Option<PathBuf>,
}

impl Tank {
    /// Read a whole tank file into memory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let size = file_size(&file)?;
        info!(path = %path.display(), size, "opened tank file");

        let mut bytes = Vec::with_capacity(size);
        file.read_to_end(&mut bytes)?;
        Ok(Tank {
            data: TankData::Owned(bytes),
            path: Some(path.to_path_buf()),
        })
    }

    /// Map a tank file copy-on-write; normalization never reaches the file on disk
    #[cfg(feature = "mmap")]
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file_size(&file)?;
        info!(path = %path.display(), size, "mapping tank file into memory");

        // Zero-length maps are rejected on some platforms
        let data = if size == 0 {
            TankData::Owned(Vec::new())
        } else {
            let mmap = unsafe { MmapOptions::new().map_copy(&file)? };
            TankData::Mapped(mmap)
        };
        Ok(Tank {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    /// Read a whole tank file without blocking the async runtime
    #[cfg(feature = "async")]
    pub async fn open_async(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        info!(path = %path.display(), size = bytes.len(), "opened tank file");
        Ok(Tank {
            data: TankData::Owned(bytes),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Tank {
            data: TankData::Owned(bytes),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            TankData::Owned(bytes) => bytes.as_slice(),
            #[cfg(feature = "mmap")]
            TankData::Mapped(mmap) => &mmap[..],
        }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.data {
            TankData::Owned(bytes) => bytes.as_mut_slice(),
            #[cfg(feature = "mmap")]
            TankData::Mapped(mmap) => &mut mmap[..],
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scan the whole tank with `config`, normalizing records in place
    pub fn scan(&mut self, config: ScanConfig, accept: Option<&dyn AcceptRecord>) -> Result<TankIndex> {
        let index = Scanner::new(config).scan(self.as_bytes_mut(), accept)?;
        info!(
            records = index.len(),
            bytes_skipped = index.stats.bytes_skipped,
            "estimation complete, total {} traces",
            index.len()
        );
        Ok(index)
    }

    /// Raw bytes of an indexed record
    pub fn record(&self, desc: &RecordDescriptor) -> Result<&[u8]> {
        self.as_bytes().get(desc.range()).ok_or_else(|| {
            TankError::InvalidArgument(format!(
                "record at {}..{} lies outside a {} byte tank",
                desc.offset,
                desc.end_offset(),
                self.len()
            ))
        })
    }

    /// Header of an indexed record; indexed records are already in host order
    pub fn header(&self, desc: &RecordDescriptor) -> Result<TraceHeader> {
        TraceHeader::decode(self.record(desc)?, host_byte_order()?)
    }

    /// Payload samples of an indexed record
    pub fn samples(&self, desc: &RecordDescriptor) -> Result<Samples> {
        let bytes = self.record(desc)?;
        let header = TraceHeader::decode(bytes, host_byte_order()?)?;
        let datatype = header
            .datatype()
            .ok_or_else(|| TankError::InvalidArgument(format!("no datatype at offset {}", desc.offset)))?;
        let count = usize::try_from(header.nsamp).unwrap_or(0);
        Samples::decode(&bytes[TraceHeader::SIZE..], datatype, count)
    }
}

fn file_size(file: &File) -> Result<usize> {
    checked_size(file.metadata()?.len())
}

fn checked_size(len: u64) -> Result<usize> {
    usize::try_from(len).map_err(|_| {
        TankError::InvalidArgument(format!("tank of {} bytes does not fit in memory", len))
    })
}

impl std::fmt::Debug for Tank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tank")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}
