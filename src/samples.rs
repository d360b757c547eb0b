// src/samples.rs
//! Typed access to the payload of a TRACEBUF2 record.

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use bytes::{BufMut, BytesMut};

use crate::error::{Result, StructuralFault};
use crate::types::{ByteOrder, Datatype, NumericKind};
use crate::utils::host_byte_order;

/// Payload samples in one of the four supported widths
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Raw statistics of a run of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

impl SampleStats {
    /// Extremes relative to the mean
    pub fn dc_corrected(&self) -> (f64, f64) {
        (self.max - self.mean, self.min - self.mean)
    }

    pub fn spread(&self) -> f64 {
        (self.max - self.min).abs()
    }
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::I16(v) => v.len(),
            Samples::I32(v) => v.len(),
            Samples::F32(v) => v.len(),
            Samples::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_width(&self) -> usize {
        match self {
            Samples::I16(_) => 2,
            Samples::I32(_) | Samples::F32(_) => 4,
            Samples::F64(_) => 8,
        }
    }

    pub fn kind(&self) -> NumericKind {
        match self {
            Samples::I16(_) | Samples::I32(_) => NumericKind::Integer,
            Samples::F32(_) | Samples::F64(_) => NumericKind::Float,
        }
    }

    /// Datatype tag these samples carry when written in `order`
    pub fn datatype(&self, order: ByteOrder) -> Datatype {
        match (self, order) {
            (Samples::I16(_), ByteOrder::Little) => Datatype::I2,
            (Samples::I16(_), ByteOrder::Big) => Datatype::S2,
            (Samples::I32(_), ByteOrder::Little) => Datatype::I4,
            (Samples::I32(_), ByteOrder::Big) => Datatype::S4,
            (Samples::F32(_), ByteOrder::Little) => Datatype::F4,
            (Samples::F32(_), ByteOrder::Big) => Datatype::T4,
            (Samples::F64(_), ByteOrder::Little) => Datatype::F8,
            (Samples::F64(_), ByteOrder::Big) => Datatype::T8,
        }
    }

    /// Decode `count` samples from `payload` laid out per `datatype`
    pub fn decode(payload: &[u8], datatype: Datatype, count: usize) -> Result<Self> {
        let width = datatype.sample_width();
        let needed = count.saturating_mul(width);
        if payload.len() < needed {
            return Err(StructuralFault::PayloadOverrun {
                needed,
                available: payload.len(),
            }
            .into());
        }
        let payload = &payload[..needed];

        if datatype.byte_order() == host_byte_order()? {
            return Ok(Self::decode_native(payload, datatype));
        }
        Ok(match datatype.byte_order() {
            ByteOrder::Little => Self::decode_with::<LittleEndian>(payload, datatype, count),
            ByteOrder::Big => Self::decode_with::<BigEndian>(payload, datatype, count),
        })
    }

    fn decode_native(payload: &[u8], datatype: Datatype) -> Self {
        let width = datatype.sample_width();
        let chunks = payload.chunks_exact(width);
        match (datatype.is_integer(), width) {
            (true, 2) => Samples::I16(chunks.map(bytemuck::pod_read_unaligned::<i16>).collect()),
            (true, _) => Samples::I32(chunks.map(bytemuck::pod_read_unaligned::<i32>).collect()),
            (false, 4) => Samples::F32(chunks.map(bytemuck::pod_read_unaligned::<f32>).collect()),
            (false, _) => Samples::F64(chunks.map(bytemuck::pod_read_unaligned::<f64>).collect()),
        }
    }

    fn decode_with<E: Endian>(payload: &[u8], datatype: Datatype, count: usize) -> Self {
        match (datatype.is_integer(), datatype.sample_width()) {
            (true, 2) => {
                let mut out = vec![0i16; count];
                E::read_i16_into(payload, &mut out);
                Samples::I16(out)
            }
            (true, _) => {
                let mut out = vec![0i32; count];
                E::read_i32_into(payload, &mut out);
                Samples::I32(out)
            }
            (false, 4) => {
                let mut out = vec![0f32; count];
                E::read_f32_into(payload, &mut out);
                Samples::F32(out)
            }
            (false, _) => {
                let mut out = vec![0f64; count];
                E::read_f64_into(payload, &mut out);
                Samples::F64(out)
            }
        }
    }

    /// Append the samples to `buf` in `order`
    pub fn write_to(&self, buf: &mut BytesMut, order: ByteOrder) {
        buf.reserve(self.len() * self.sample_width());
        match (self, order) {
            (Samples::I16(v), ByteOrder::Little) => v.iter().for_each(|&x| buf.put_i16_le(x)),
            (Samples::I16(v), ByteOrder::Big) => v.iter().for_each(|&x| buf.put_i16(x)),
            (Samples::I32(v), ByteOrder::Little) => v.iter().for_each(|&x| buf.put_i32_le(x)),
            (Samples::I32(v), ByteOrder::Big) => v.iter().for_each(|&x| buf.put_i32(x)),
            (Samples::F32(v), ByteOrder::Little) => v.iter().for_each(|&x| buf.put_f32_le(x)),
            (Samples::F32(v), ByteOrder::Big) => v.iter().for_each(|&x| buf.put_f32(x)),
            (Samples::F64(v), ByteOrder::Little) => v.iter().for_each(|&x| buf.put_f64_le(x)),
            (Samples::F64(v), ByteOrder::Big) => v.iter().for_each(|&x| buf.put_f64(x)),
        }
    }

    /// Each sample widened to f64
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Samples::I16(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::I32(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::F32(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::F64(v) => v.clone(),
        }
    }

    /// Max, min and mean, or None when there are no samples
    pub fn stats(&self) -> Option<SampleStats> {
        let values = self.to_f64_vec();
        let first = *values.first()?;
        let (max, min, sum) = values
            .iter()
            .fold((first, first, 0.0), |(max, min, sum), &x| {
                (max.max(x), min.min(x), sum + x)
            });
        Some(SampleStats {
            max,
            min,
            mean: sum / values.len() as f64,
        })
    }
}
