// tests/tools_tests.rs
mod common;

use common::*;
use tank_rs::*;

fn write_tank(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn mixed_tank() -> Vec<u8> {
    concat(&[
        int_record("TATO", 1_700_000_000.0, vec![1; 10], foreign()),
        int_record("NACB", 1_700_000_000.0, vec![2; 10], host()),
        vec![0x5A; 11],
        int_record("TATO", 1_700_000_300.0, vec![3; 10], foreign()),
        int_record("TATO", 1_700_000_900.0, vec![4; 10], host()),
    ])
}

#[test]
fn test_cut_file_roundtrip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let input = write_tank(&dir, "in.tnk", &mixed_tank());
    let output = dir.path().join("cut.tnk");

    let mut tank = Tank::open(&input).unwrap();
    let window = TimeWindow::parse("20231114221320", None, None).unwrap();
    let mut writer = TankWriter::create(&output).unwrap();
    assert_eq!(cut(&mut tank, &window, &mut writer).unwrap(), 3);
    writer.flush().unwrap();
    drop(writer);

    // Output is a clean host-order tank
    let mut cut_tank = Tank::open(&output).unwrap();
    let before = cut_tank.as_bytes().to_vec();
    let index = cut_tank.scan(ScanConfig::default(), None).unwrap();
    assert_eq!(index.len(), 3);
    assert!(index.resyncs.is_empty());
    assert_eq!(cut_tank.as_bytes(), &before[..]);
    assert_eq!(
        cut_tank.samples(&index.records[2]).unwrap(),
        Samples::I32(vec![3; 10])
    );
}

#[test]
fn test_extract_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tank(&dir, "in.tnk", &mixed_tank());
    let output = dir.path().join("tato.tnk");

    let mut tank = Tank::open(&input).unwrap();
    let filter = ScnlFilter::new()
        .with_station("TATO")
        .unwrap()
        .with_network("TW")
        .unwrap()
        .with_location("wild")
        .unwrap();
    let mut writer = TankWriter::create(&output).unwrap();
    assert_eq!(extract(&mut tank, &filter, &mut writer).unwrap(), 3);
    assert_eq!(writer.bytes_written(), 3 * 104);
    drop(writer);

    let mut out = Tank::open(&output).unwrap();
    let index = out.scan(ScanConfig::default(), None).unwrap();
    for desc in &index {
        assert_eq!(out.header(desc).unwrap().station(), "TATO");
    }
}

#[test]
fn test_extract_without_matches_removes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tank(&dir, "in.tnk", &mixed_tank());
    let output = dir.path().join("none.tnk");

    let mut tank = Tank::open(&input).unwrap();
    let filter = ScnlFilter::new().with_station("NONE").unwrap();
    let mut writer = TankWriter::create(&output).unwrap();
    assert!(output.exists());

    let err = extract(&mut tank, &filter, &mut writer).unwrap_err();
    assert!(matches!(err, TankError::NoRecords));
    assert!(!output.exists());
}

#[test]
fn test_sniff_output() {
    let mut tank = Tank::from_bytes(mixed_tank());
    let mut out = Vec::new();
    let count = sniff(&mut tank, &SniffOptions::default(), &mut out).unwrap();
    assert_eq!(count, 4);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("TATO.HHZ.TW.00 (32 30) 0 "));
    assert!(lines[0].contains(" 2023/11/14_22:13:20.00 (1700000000.0000) "));
    assert!(lines[0].ends_with(" 104 bytes"));
    assert!(lines[1].starts_with("NACB."));
}

#[test]
fn test_sniff_with_data() {
    let mut tank = Tank::from_bytes(int_record("DATA", 0.0, (0..10).collect(), foreign()));
    let options = SniffOptions {
        filter: ScnlFilter::new(),
        show_data: true,
    };
    let mut out = Vec::new();
    sniff(&mut tank, &options, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("     0      1      2"));
    assert!(text.contains("Raw Data statistics max=9 min=0 avg=4.500000"));
    assert!(text.contains("DC corrected statistics max=4.500000 min=-4.500000 spread=9"));
}

#[test]
fn test_sniff_lists_records_with_unprintable_times() {
    let mut tank = Tank::from_bytes(concat(&[
        int_record("NORM", 1_700_000_000.0, vec![1, 2], foreign()),
        int_record("FAR", 1e300, vec![1, 2], foreign()),
    ]));
    let mut out = Vec::new();
    assert_eq!(sniff(&mut tank, &SniffOptions::default(), &mut out).unwrap(), 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("NORM."));
    assert!(lines[0].contains("2023/11/14_22:13:20.00"));
    assert!(lines[1].starts_with("FAR."));
    assert!(lines[1].contains(" (invalid) (1000"));
    assert!(lines[1].ends_with(" 72 bytes"));
}

#[test]
fn test_missing_tank_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Tank::open(dir.path().join("absent.tnk")).unwrap_err();
    assert!(matches!(err, TankError::Io(_)));
    assert!(!err.is_recoverable());
}

#[cfg(feature = "mmap")]
#[test]
fn test_mmap_cut() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tank(&dir, "in.tnk", &mixed_tank());
    let mut tank = Tank::open_mmap(&input).unwrap();
    let window = TimeWindow::from_duration(1_700_000_800.0, 200.0).unwrap();
    let mut writer = TankWriter::new(Vec::new());
    assert_eq!(cut(&mut tank, &window, &mut writer).unwrap(), 1);
    assert_eq!(std::fs::read(&input).unwrap(), mixed_tank());
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_async_open_and_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tank(&dir, "in.tnk", &mixed_tank());
    let output = dir.path().join("async_out.tnk");

    let mut tank = Tank::open_async(&input).await.unwrap();
    let index = tank.scan(ScanConfig::default(), None).unwrap();

    let writer = AsyncTankWriter::create(&output).await.unwrap();
    for desc in &index {
        writer.write_record(tank.record(desc).unwrap().to_vec()).await.unwrap();
    }
    assert_eq!(writer.close().await.unwrap(), 4);

    let mut out = Tank::open_async(&output).await.unwrap();
    assert_eq!(out.scan(ScanConfig::default(), None).unwrap().len(), 4);
}
