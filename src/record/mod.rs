// src/record/mod.rs
mod builder;
mod descriptor;
mod header;

pub use builder::TraceBuf;
pub use descriptor::RecordDescriptor;
pub use header::{encode_code, TraceHeader, HEADER_SIZE};
