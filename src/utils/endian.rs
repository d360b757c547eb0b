// src/utils/endian.rs
use std::sync::OnceLock;

use crate::error::{Result, TankError};
use crate::types::ByteOrder;

static HOST_BYTE_ORDER: OnceLock<Option<ByteOrder>> = OnceLock::new();

/// Reverse a 2-byte region in place.
#[inline]
pub fn swap_2(data: &mut [u8; 2]) {
    data.swap(0, 1);
}

/// Reverse a 4-byte region in place.
#[inline]
pub fn swap_4(data: &mut [u8; 4]) {
    data.swap(0, 3);
    data.swap(1, 2);
}

/// Reverse an 8-byte region in place.
#[inline]
pub fn swap_8(data: &mut [u8; 8]) {
    data.swap(0, 7);
    data.swap(1, 6);
    data.swap(2, 5);
    data.swap(3, 4);
}

/// Byte-swap every `width`-sized element of `data` in place.
///
/// Only widths 2, 4 and 8 are swapped; any trailing partial element is left alone.
pub fn swap_elements(data: &mut [u8], width: usize) {
    match width {
        2 => {
            for chunk in data.chunks_exact_mut(2) {
                if let Ok(value) = <&mut [u8; 2]>::try_from(chunk) {
                    swap_2(value);
                }
            }
        }
        4 => {
            for chunk in data.chunks_exact_mut(4) {
                if let Ok(value) = <&mut [u8; 4]>::try_from(chunk) {
                    swap_4(value);
                }
            }
        }
        8 => {
            for chunk in data.chunks_exact_mut(8) {
                if let Ok(value) = <&mut [u8; 8]>::try_from(chunk) {
                    swap_8(value);
                }
            }
        }
        _ => {}
    }
}

/// Inspect how the machine stores a known 16-bit value.
pub fn probe_host_byte_order() -> Option<ByteOrder> {
    match 256u16.to_ne_bytes() {
        [0x00, 0x01] => Some(ByteOrder::Little),
        [0x01, 0x00] => Some(ByteOrder::Big),
        _ => None,
    }
}

/// Host byte order, probed on first use and cached for the life of the process.
pub fn host_byte_order() -> Result<ByteOrder> {
    HOST_BYTE_ORDER
        .get_or_init(probe_host_byte_order)
        .ok_or(TankError::UnknownHostByteOrder)
}
