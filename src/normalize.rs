// src/normalize.rs
//! Byte-order normalization and validation of a single TRACEBUF2 record.
//!
//! [`normalize_record`] decodes the header at the start of a buffer using the byte order its
//! datatype tag declares, checks that the sample count is bounded and that the end time agrees
//! with start time, count and rate, and then rewrites header and payload in host byte order.
//! Nothing is written unless the record validates, so a rejected candidate leaves the buffer
//! untouched for the next resync attempt.

use tracing::debug;

use crate::error::{Result, StructuralFault, TankError};
use crate::record::{TraceHeader, HEADER_SIZE};
use crate::types::{DataFamily, Datatype};
use crate::utils::{host_byte_order, swap_elements};
use crate::MAX_TRACEBUF_SIZE;

/// Outcome of a successful normalization
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The header in host byte order, datatype tag already rewritten
    pub header: TraceHeader,
    /// Encoding family declared before normalization
    pub original_order: DataFamily,
    /// Header plus payload size in bytes
    pub size: usize,
}

/// Normalize the record at the start of `record` using the default size bound.
pub fn make_local(record: &mut [u8]) -> Result<Normalized> {
    normalize_record(record, MAX_TRACEBUF_SIZE)
}

/// Normalize the record at the start of `record` to host byte order.
///
/// `record` may extend past the end of the record; the payload must fit inside it.
/// Returns [`TankError::Structural`] or [`TankError::Semantic`] for a bad candidate and
/// [`TankError::UnknownHostByteOrder`] if the host order cannot be probed.
pub fn normalize_record(record: &mut [u8], max_record_size: usize) -> Result<Normalized> {
    let host = host_byte_order()?;

    if record.len() < HEADER_SIZE {
        return Err(StructuralFault::Truncated { available: record.len() }.into());
    }

    let tag_offset = TraceHeader::DATATYPE_OFFSET;
    let tag = [record[tag_offset], record[tag_offset + 1]];
    let datatype = Datatype::from_tag(tag).ok_or(StructuralFault::UnknownDatatype(tag))?;
    let original_order = datatype.family();

    let mut header = TraceHeader::decode(record, datatype.byte_order())?;

    let size = checked_record_size(&header, datatype, max_record_size)?;
    if size > record.len() {
        return Err(StructuralFault::PayloadOverrun {
            needed: size,
            available: record.len(),
        }
        .into());
    }

    check_end_time(&header)?;

    if datatype.byte_order() != host {
        header.set_datatype(datatype.with_byte_order(host));
        header.encode_into(&mut record[..HEADER_SIZE], host)?;
        swap_elements(&mut record[HEADER_SIZE..size], datatype.sample_width());
    }

    Ok(Normalized {
        header,
        original_order,
        size,
    })
}

/// Bound the sample count before anything touches the payload
fn checked_record_size(
    header: &TraceHeader,
    datatype: Datatype,
    max_record_size: usize,
) -> Result<usize> {
    let width = datatype.sample_width();
    let limit = max_record_size.saturating_sub(HEADER_SIZE) / width;

    match usize::try_from(header.nsamp) {
        Ok(nsamp) if nsamp <= limit => Ok(HEADER_SIZE + nsamp * width),
        _ => {
            debug!(
                scnl = %header.scnl(),
                nsamp = header.nsamp,
                datatype = %datatype,
                "packet has bad number of samples"
            );
            Err(StructuralFault::BadSampleCount {
                nsamp: header.nsamp,
                limit,
            }
            .into())
        }
    }
}

/// The end time must lie within five sample intervals of the computed one.
fn check_end_time(header: &TraceHeader) -> Result<()> {
    let expected_end = header.start_time + (header.nsamp as f64 - 1.0) / header.sample_rate;
    let fudge = 5.0 / header.sample_rate;

    // NaN anywhere makes both comparisons false
    let within = header.end_time >= expected_end - fudge && header.end_time <= expected_end + fudge;
    if within {
        return Ok(());
    }

    debug!(
        scnl = %header.scnl(),
        start_time = header.start_time,
        sample_rate = header.sample_rate,
        nsamp = header.nsamp,
        end_time = header.end_time,
        computed_end_time = expected_end,
        "packet has inconsistent header values: endtime is not within 5 sample intervals of computed endtime"
    );
    Err(TankError::Semantic {
        scnl: header.scnl(),
        end_time: header.end_time,
        expected_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TraceBuf;
    use crate::samples::Samples;
    use crate::types::ByteOrder;

    fn host() -> ByteOrder {
        host_byte_order().unwrap()
    }

    fn foreign() -> ByteOrder {
        match host() {
            ByteOrder::Little => ByteOrder::Big,
            ByteOrder::Big => ByteOrder::Little,
        }
    }

    fn record(samples: Samples, order: ByteOrder) -> Vec<u8> {
        TraceBuf::new()
            .with_scnl("AB", "CH", "NW", "00")
            .with_pinno(12)
            .with_start_time(1000.0)
            .with_sample_rate(50.0)
            .with_samples(samples)
            .with_byte_order(order)
            .to_bytes()
            .to_vec()
    }

    #[test]
    fn test_foreign_integer_record_becomes_local() {
        let samples = Samples::I32(vec![1, -1, 123_456, i32::MAX]);
        let mut bytes = record(samples.clone(), foreign());
        let normalized = make_local(&mut bytes).unwrap();

        assert_eq!(normalized.original_order.byte_order(), foreign());
        assert_eq!(normalized.size, 64 + 16);
        assert_eq!(normalized.header.pinno, 12);
        assert_eq!(normalized.header.datatype(), Some(samples.datatype(host())));

        // Header bytes are now in host order
        let reread = TraceHeader::decode(&bytes, host()).unwrap();
        assert_eq!(reread, normalized.header);
        let payload = Samples::decode(&bytes[64..], samples.datatype(host()), 4).unwrap();
        assert_eq!(payload, samples);
    }

    #[test]
    fn test_foreign_float_records_become_local() {
        for samples in [Samples::F32(vec![0.5, -1.25]), Samples::F64(vec![3.0, 1e-9, -7.5])] {
            let count = samples.len();
            let mut bytes = record(samples.clone(), foreign());
            let normalized = make_local(&mut bytes).unwrap();
            let local = samples.datatype(host());
            assert_eq!(&bytes[57..59], &local.tag());
            assert_eq!(Samples::decode(&bytes[64..], local, count).unwrap(), samples);
            assert_eq!(normalized.original_order, samples.datatype(foreign()).family());
        }
    }

    #[test]
    fn test_host_record_is_untouched() {
        let mut bytes = record(Samples::I16(vec![5, 6, 7]), host());
        let before = bytes.clone();
        let normalized = make_local(&mut bytes).unwrap();
        assert_eq!(bytes, before);
        assert_eq!(normalized.original_order.byte_order(), host());
    }

    #[test]
    fn test_conversion_factor_swapped_for_v21() {
        let mut bytes = TraceBuf::new()
            .with_start_time(0.0)
            .with_sample_rate(1.0)
            .with_samples(Samples::F32(vec![1.0, 2.0]))
            .with_conversion_factor(0.25)
            .with_byte_order(foreign())
            .to_bytes()
            .to_vec();
        let normalized = make_local(&mut bytes).unwrap();
        assert_eq!(normalized.header.conversion_factor, Some(0.25));
        assert_eq!(&bytes[60..64], &0.25f32.to_ne_bytes());
    }

    #[test]
    fn test_quality_bytes_untouched_for_v20() {
        let mut bytes = record(Samples::I32(vec![1]), foreign());
        bytes[60] = 0x12;
        bytes[61] = 0x34;
        make_local(&mut bytes).unwrap();
        assert_eq!(&bytes[60..62], &[0x12, 0x34]);
    }

    #[test]
    fn test_unknown_datatype_is_structural() {
        let mut bytes = record(Samples::I32(vec![1]), host());
        bytes[57] = b'g';
        let err = make_local(&mut bytes).unwrap_err();
        assert_eq!(err.status(), -1);
        assert!(matches!(
            err,
            TankError::Structural(StructuralFault::UnknownDatatype(_))
        ));
    }

    #[test]
    fn test_sample_count_bound() {
        // (4096 - 64) / 4 = 1008 samples fit
        let fits = TraceBuf::new()
            .with_samples(Samples::I32(vec![0; 1008]))
            .with_byte_order(host())
            .to_bytes();
        let mut bytes = fits.to_vec();
        assert_eq!(make_local(&mut bytes).unwrap().size, 4096);

        let mut bytes = TraceBuf::new()
            .with_samples(Samples::I32(vec![0; 1009]))
            .with_byte_order(foreign())
            .to_bytes()
            .to_vec();
        let before = bytes.clone();
        let err = make_local(&mut bytes).unwrap_err();
        assert!(matches!(
            err,
            TankError::Structural(StructuralFault::BadSampleCount { nsamp: 1009, limit: 1008 })
        ));
        assert_eq!(bytes, before);
    }

    #[test]
    fn test_negative_sample_count_rejected() {
        let mut bytes = TraceBuf::new()
            .with_nsamp(-3)
            .with_end_time(-3.0)
            .with_byte_order(host())
            .to_bytes()
            .to_vec();
        let err = make_local(&mut bytes).unwrap_err();
        assert!(matches!(
            err,
            TankError::Structural(StructuralFault::BadSampleCount { nsamp: -3, .. })
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let mut bytes = record(Samples::I32(vec![1, 2, 3]), foreign());
        bytes.truncate(64 + 8);
        let before = bytes.clone();
        let err = make_local(&mut bytes).unwrap_err();
        assert!(matches!(
            err,
            TankError::Structural(StructuralFault::PayloadOverrun { needed: 76, available: 72 })
        ));
        assert_eq!(bytes, before);
    }

    #[test]
    fn test_end_time_outside_tolerance_is_semantic() {
        // start 0, 10 samples at 1 Hz: computed end 9, tolerance 5
        let build = |end: f64| {
            TraceBuf::new()
                .with_samples(Samples::I32(vec![0; 10]))
                .with_end_time(end)
                .with_byte_order(foreign())
                .to_bytes()
                .to_vec()
        };

        assert!(make_local(&mut build(14.0)).is_ok());
        assert!(make_local(&mut build(4.0)).is_ok());

        let mut late = build(14.5);
        let before = late.clone();
        let err = make_local(&mut late).unwrap_err();
        assert_eq!(err.status(), -2);
        assert!(err.is_recoverable());
        assert_eq!(late, before);

        assert!(matches!(make_local(&mut build(3.5)), Err(TankError::Semantic { .. })));
    }

    #[test]
    fn test_nonpositive_rate_rejected() {
        for rate in [0.0, -1.0, f64::NAN] {
            let mut bytes = TraceBuf::new()
                .with_sample_rate(rate)
                .with_samples(Samples::I16(vec![1, 2]))
                .with_end_time(0.0)
                .with_byte_order(host())
                .to_bytes()
                .to_vec();
            assert!(make_local(&mut bytes).is_err(), "rate {} accepted", rate);
        }
    }

    #[test]
    fn test_normalize_twice_is_idempotent() {
        let mut bytes = record(Samples::I16(vec![-5, 300]), foreign());
        make_local(&mut bytes).unwrap();
        let once = bytes.clone();
        let second = make_local(&mut bytes).unwrap();
        assert_eq!(bytes, once);
        assert_eq!(second.original_order.byte_order(), host());
    }

    #[test]
    fn test_custom_bound() {
        let mut bytes = record(Samples::I32(vec![0; 10]), host());
        assert!(normalize_record(&mut bytes, 64 + 40).is_ok());
        assert!(normalize_record(&mut bytes, 64 + 39).is_err());
    }
}
