// src/tools/sniff.rs
use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::progress::Progress;
use crate::record::{RecordDescriptor, TraceHeader};
use crate::samples::Samples;
use crate::scanner::{AcceptRecord, ScanConfig};
use crate::tank::Tank;
use crate::time::format_timestamp;
use crate::types::NumericKind;

use super::ScnlFilter;

const SAMPLES_PER_LINE: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct SniffOptions {
    /// Only records matching the filter are printed; unrestricted prints everything
    pub filter: ScnlFilter,
    /// Also dump samples and their statistics
    pub show_data: bool,
}

/// Printed in place of a time that has no calendar representation
const INVALID_TIME: &str = "(invalid)";

/// One summary line for an indexed record, without a trailing newline.
///
/// Times outside the calendar range print as `(invalid)` next to their raw epoch value.
pub fn format_record_line(header: &TraceHeader, desc: &RecordDescriptor) -> String {
    let rate = if header.sample_rate < 1.0 {
        format!("{:6.4}", header.sample_rate)
    } else {
        format!("{:.1}", header.sample_rate)
    };
    format!(
        "{}.{}.{}.{} ({:X} {:X}) {} {}{} {:4} {} {} ({:.4}) {} ({:.4}) {} bytes",
        header.station(),
        header.channel(),
        header.network(),
        header.location(),
        header.version[0],
        header.version[1],
        header.pinno,
        desc.original_order.as_char(),
        header.datatype[1] as char,
        header.nsamp,
        rate,
        calendar_time(header.start_time),
        header.start_time,
        calendar_time(header.end_time),
        header.end_time,
        desc.size
    )
}

fn calendar_time(epoch: f64) -> String {
    format_timestamp(epoch).unwrap_or_else(|_| INVALID_TIME.to_string())
}

/// Samples ten to a line followed by raw and DC corrected statistics
pub fn format_samples(samples: &Samples) -> String {
    let mut out = String::new();
    let values = samples.to_f64_vec();
    let integer = samples.kind() == NumericKind::Integer;

    for (i, value) in values.iter().enumerate() {
        if integer {
            let _ = write!(out, "{:6} ", *value as i64);
        } else {
            let _ = write!(out, "{:6.4} ", value);
        }
        if i % SAMPLES_PER_LINE == SAMPLES_PER_LINE - 1 {
            out.push('\n');
        }
    }
    if values.len() % SAMPLES_PER_LINE != 0 {
        out.push('\n');
    }

    if let Some(stats) = samples.stats() {
        let (dc_max, dc_min) = stats.dc_corrected();
        if integer {
            let _ = writeln!(
                out,
                "Raw Data statistics max={} min={} avg={:.6}",
                stats.max as i64, stats.min as i64, stats.mean
            );
            let _ = writeln!(
                out,
                "DC corrected statistics max={:.6} min={:.6} spread={}",
                dc_max,
                dc_min,
                stats.spread() as i64
            );
        } else {
            let _ = writeln!(
                out,
                "Raw Data statistics max={:.6} min={:.6} avg={:.6}",
                stats.max, stats.min, stats.mean
            );
            let _ = writeln!(
                out,
                "DC corrected statistics max={:.6} min={:.6} spread={:.6}",
                dc_max,
                dc_min,
                stats.spread()
            );
        }
    }
    out
}

/// Print a summary line for every record of `tank` to `out`, returning the number printed
pub fn sniff<W: Write>(tank: &mut Tank, options: &SniffOptions, out: &mut W) -> Result<usize> {
    let accept: Option<&dyn AcceptRecord> = if options.filter.is_unrestricted() {
        None
    } else {
        Some(&options.filter)
    };
    let index = tank.scan(ScanConfig::default(), accept)?;
    let mut progress = Progress::new("sniff", index.len());

    for desc in &index {
        let header = tank.header(desc)?;
        writeln!(out, "{}", format_record_line(&header, desc))?;
        if options.show_data {
            writeln!(out, "{}", format_samples(&tank.samples(desc)?))?;
        }
        progress.inc();
    }
    out.flush()?;
    progress.finish();
    Ok(index.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TraceBuf;
    use crate::types::{ByteOrder, DataFamily};

    #[test]
    fn test_record_line() {
        let header = TraceBuf::new()
            .with_scnl("TATO", "HHZ", "TW", "00")
            .with_pinno(7)
            .with_start_time(0.0)
            .with_sample_rate(100.0)
            .with_samples(Samples::I32(vec![0; 100]))
            .header();
        let desc = RecordDescriptor {
            offset: 0,
            size: 464,
            time: header.end_time,
            original_order: DataFamily::IntBig,
        };
        assert_eq!(
            format_record_line(&header, &desc),
            "TATO.HHZ.TW.00 (32 30) 7 s4  100 100.0 1970/01/01_00:00:00.00 (0.0000) \
             1970/01/01_00:00:00.99 (0.9900) 464 bytes"
        );
    }

    #[test]
    fn test_slow_rate_uses_more_decimals() {
        let header = TraceBuf::new()
            .with_sample_rate(0.1)
            .with_samples(Samples::I16(vec![1, 2]))
            .header();
        let desc = RecordDescriptor {
            offset: 0,
            size: 68,
            time: header.end_time,
            original_order: DataFamily::IntLittle,
        };
        assert!(format_record_line(&header, &desc).contains(" 0.1000 "));
    }

    #[test]
    fn test_far_future_time_prints_placeholder() {
        let header = TraceBuf::new()
            .with_start_time(1e300)
            .with_samples(Samples::I32(vec![1]))
            .header();
        let desc = RecordDescriptor {
            offset: 0,
            size: 68,
            time: header.end_time,
            original_order: DataFamily::IntLittle,
        };
        let line = format_record_line(&header, &desc);
        assert!(line.contains(" (invalid) (1"), "{}", line);
        assert!(line.ends_with(" 68 bytes"));
    }

    #[test]
    fn test_format_integer_samples() {
        let text = format_samples(&Samples::I16((1..=12).collect()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "    11     12 ");
        assert_eq!(lines[2], "Raw Data statistics max=12 min=1 avg=6.500000");
        assert_eq!(lines[3], "DC corrected statistics max=5.500000 min=-5.500000 spread=11");
    }

    #[test]
    fn test_format_float_samples() {
        let text = format_samples(&Samples::F64(vec![0.5, -0.5]));
        assert!(text.starts_with("0.5000 -0.5000 \n"));
        assert!(text.contains("spread=1.000000"));
    }

    #[test]
    fn test_sniff_with_filter() {
        let mut bytes = Vec::new();
        for sta in ["A", "B"] {
            bytes.extend_from_slice(
                &TraceBuf::new()
                    .with_scnl(sta, "HHZ", "TW", "--")
                    .with_samples(Samples::F32(vec![1.0, 2.0]))
                    .with_byte_order(ByteOrder::Big)
                    .to_bytes(),
            );
        }
        let mut tank = Tank::from_bytes(bytes);
        let options = SniffOptions {
            filter: ScnlFilter::new().with_station("B").unwrap(),
            show_data: true,
        };
        let mut out = Vec::new();
        assert_eq!(sniff(&mut tank, &options, &mut out).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("B.HHZ.TW.-- (32 30) 0 t4    2 1.0 "));
        assert!(text.contains("Raw Data statistics max=2.000000 min=1.000000 avg=1.500000"));
    }
}
