// src/utils/mod.rs
mod endian;

pub use endian::*;
