// tests/common/mod.rs
#![allow(dead_code)]

use tank_rs::*;

/// Route library logs to the test harness; RUST_LOG picks the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn host() -> ByteOrder {
    host_byte_order().unwrap()
}

pub fn foreign() -> ByteOrder {
    match host() {
        ByteOrder::Little => ByteOrder::Big,
        ByteOrder::Big => ByteOrder::Little,
    }
}

/// Integer record for `station` starting at `start` with one sample per second
pub fn int_record(station: &str, start: f64, samples: Vec<i32>, order: ByteOrder) -> Vec<u8> {
    TraceBuf::new()
        .with_scnl(station, "HHZ", "TW", "00")
        .with_start_time(start)
        .with_sample_rate(1.0)
        .with_samples(Samples::I32(samples))
        .with_byte_order(order)
        .to_bytes()
        .to_vec()
}

pub fn concat(records: &[Vec<u8>]) -> Vec<u8> {
    records.iter().flatten().copied().collect()
}
