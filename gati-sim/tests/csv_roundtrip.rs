//! CSV schema round-trip tests
//!
//! Writes generated rides through the CSV sink and reads them back. Values must
//! survive within the schema's rounding:
//!
//! | Column | Decimals | Tolerance |
//! |--------|----------|-----------|
//! | timestamp_ms | 1 | 0.05 ms |
//! | accel, gyro | 6 | 5e-7 |
//! | mag | 3 | 5e-4 |
//!
//! Run with: `cargo test --test csv_roundtrip`

use gati_sim::io::{CSV_HEADER, CsvWriter, load_csv, read_csv, write_csv, write_samples};
use gati_sim::{ImuSample, NoiseGenerator, NoiseModel, Preset, Ride};

const TIMESTAMP_TOL: f64 = 0.05e-3 + 1e-12;
const IMU_TOL: f64 = 0.5e-6 + 1e-12;
const MAG_TOL: f64 = 0.5e-3 + 1e-12;

fn assert_within_precision(original: &[ImuSample], parsed: &[ImuSample]) {
    assert_eq!(original.len(), parsed.len());
    for (i, (o, p)) in original.iter().zip(parsed).enumerate() {
        assert!(
            (o.timestamp - p.timestamp).abs() <= TIMESTAMP_TOL,
            "row {} timestamp {} vs {}",
            i,
            o.timestamp,
            p.timestamp
        );
        for axis in 0..3 {
            assert!((o.accel[axis] - p.accel[axis]).abs() <= IMU_TOL, "row {} accel", i);
            assert!((o.gyro[axis] - p.gyro[axis]).abs() <= IMU_TOL, "row {} gyro", i);
            assert!((o.mag[axis] - p.mag[axis]).abs() <= MAG_TOL, "row {} mag", i);
        }
    }
}

fn noisy_ride() -> Vec<ImuSample> {
    let ride = Ride::from_specs(&Preset::Short.scenarios(), 100.0).unwrap();
    let mut noise = NoiseGenerator::new(2024);
    NoiseModel::new(0.05)
        .unwrap()
        .apply_iter(ride.samples(), &mut noise)
        .collect()
}

#[test]
fn test_in_memory_roundtrip() {
    let samples = noisy_ride();

    let mut writer = CsvWriter::new(Vec::new());
    let written = write_samples(&mut writer, samples.iter().copied()).unwrap();
    assert_eq!(written, samples.len());

    let bytes = writer.into_inner();
    let text = std::str::from_utf8(&bytes).unwrap();
    assert_eq!(text.lines().next(), Some(CSV_HEADER));
    assert_eq!(text.lines().count(), samples.len() + 1);

    let parsed = read_csv(bytes.as_slice()).unwrap();
    assert_within_precision(&samples, &parsed);
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ride.csv");

    let samples = noisy_ride();
    write_csv(&path, &samples).unwrap();

    let parsed = load_csv(&path).unwrap();
    assert_within_precision(&samples, &parsed);
}

#[test]
fn test_streamed_ride_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("streamed.csv");

    let ride = Ride::from_specs(&Preset::Medium.scenarios(), 50.0).unwrap();
    let mut writer = CsvWriter::create(&path).unwrap();
    let count = write_samples(&mut writer, ride.samples()).unwrap();
    assert_eq!(count, ride.sample_count());

    let parsed = load_csv(&path).unwrap();
    assert_within_precision(&ride.generate(), &parsed);
}
