// src/lib.rs
//! # tank-rs
//!
//! Reading, normalizing and cutting Earthworm tank files: flat files of back-to-back
//! TRACEBUF2 waveform records written in either byte order.
//!
//! ## Features
//!
//! - **Resynchronizing scanner**: corrupt stretches are skipped one byte at a time until a
//!   valid record boundary shows up again
//! - **In-place normalization**: headers and samples are rewritten in host byte order
//! - **Filtering**: time windows, SCNL codes or any closure over the header
//! - **Memory mapped and async input** behind the `mmap` and `async` features
//!
//! ## Quick Start
//!
//! ### Scanning a tank
//!
//! ```rust,no_run
//! use tank_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut tank = Tank::open("waveforms.tnk")?;
//!     let index = tank.scan(ScanConfig::default(), None)?;
//!
//!     for desc in &index {
//!         let header = tank.header(desc)?;
//!         println!("{} {} samples at {}", header.scnl(), header.nsamp, header.start_time);
//!     }
//!     println!("skipped {} bytes", index.stats.bytes_skipped);
//!     Ok(())
//! }
//! ```
//!
//! ### Cutting a time window
//!
//! ```rust,no_run
//! use tank_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut tank = Tank::open("waveforms.tnk")?;
//!     let window = TimeWindow::parse("20240101000000", None, Some(300.0))?;
//!     let mut writer = TankWriter::create("cut.tnk")?;
//!     cut(&mut tank, &window, &mut writer)?;
//!     Ok(())
//! }
//! ```
//!
//! ### Async writing
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! use tank_rs::*;
//!
//! # #[cfg(feature = "async")]
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let writer = AsyncTankWriter::create("out.tnk").await?;
//!     let record = TraceBuf::new()
//!         .with_scnl("TATO", "HHZ", "TW", "00")
//!         .with_samples(Samples::I32(vec![0; 100]))
//!         .to_bytes();
//!     writer.write_record(record).await?;
//!     writer.close().await?;
//!     Ok(())
//! }
//! # #[cfg(not(feature = "async"))]
//! # fn main() {}
//! ```

// Modules
pub mod error;
pub mod types;
pub mod record;
pub mod samples;
pub mod normalize;
pub mod scanner;
pub mod tank;
pub mod writer;
pub mod tools;
pub mod time;
pub mod progress;

mod utils;

pub use error::{Result, StructuralFault, TankError};

pub use types::{ByteOrder, DataFamily, Datatype, NumericKind};

pub use record::{encode_code, RecordDescriptor, TraceBuf, TraceHeader, HEADER_SIZE};

pub use samples::{SampleStats, Samples};

pub use normalize::{make_local, normalize_record, Normalized};

pub use scanner::{scan_tank, AcceptRecord, ResyncEvent, ScanConfig, ScanStats, Scanner, TankIndex};

pub use tank::Tank;

pub use writer::TankWriter;

#[cfg(feature = "async")]
pub use writer::AsyncTankWriter;

pub use tools::{cut, extract, sniff, ScnlFilter, SniffOptions, TimeWindow};

pub use time::{format_timestamp, parse_timestamp};

pub use progress::Progress;

pub use utils::{host_byte_order, probe_host_byte_order, swap_2, swap_4, swap_8, swap_elements};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use tank_rs::prelude::*;
    //! ```

    pub use crate::error::{Result, TankError};
    pub use crate::record::{RecordDescriptor, TraceBuf, TraceHeader};
    pub use crate::samples::Samples;
    pub use crate::scanner::{scan_tank, ScanConfig, TankIndex};
    pub use crate::tank::Tank;
    pub use crate::types::ByteOrder;
    pub use crate::writer::TankWriter;

    #[cfg(feature = "async")]
    pub use crate::writer::AsyncTankWriter;
}

/// Largest record, header included, the scanner indexes by default
pub const MAX_TRACEBUF_SIZE: usize = 4096;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
