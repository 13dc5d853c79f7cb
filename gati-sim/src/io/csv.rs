//! CSV output in the ingestion schema
//!
//! Column order and precision are the compatibility contract with downstream
//! consumers:
//!
//! | Column | Unit | Decimals |
//! |--------|------|----------|
//! | `timestamp_ms` | ms | 1 |
//! | `accel_x`, `accel_y`, `accel_z` | m/s² | 6 |
//! | `gyro_x`, `gyro_y`, `gyro_z` | rad/s | 6 |
//! | `mag_x`, `mag_y`, `mag_z` | µT | 3 |

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Error, Result};
use crate::types::ImuSample;

/// Header row
pub const CSV_HEADER: &str =
    "timestamp_ms,accel_x,accel_y,accel_z,gyro_x,gyro_y,gyro_z,mag_x,mag_y,mag_z";

const COLUMN_COUNT: usize = 10;

/// Destination for a generated sample stream
pub trait SampleSink {
    /// Accept the next sample
    fn write_sample(&mut self, sample: &ImuSample) -> Result<()>;

    /// Flush buffered output. Called once after the last sample.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink
impl SampleSink for Vec<ImuSample> {
    fn write_sample(&mut self, sample: &ImuSample) -> Result<()> {
        self.push(*sample);
        Ok(())
    }
}

/// CSV sink over any writer
pub struct CsvWriter<W: Write> {
    writer: W,
    header_written: bool,
    rows: usize,
}

impl CsvWriter<BufWriter<File>> {
    /// Create (or truncate) a CSV file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows: 0,
        }
    }

    /// Data rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_header(&mut self) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", CSV_HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write> SampleSink for CsvWriter<W> {
    fn write_sample(&mut self, s: &ImuSample) -> Result<()> {
        self.ensure_header()?;
        writeln!(
            self.writer,
            "{:.1},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.3},{:.3},{:.3}",
            s.timestamp_ms(),
            s.accel[0],
            s.accel[1],
            s.accel[2],
            s.gyro[0],
            s.gyro[1],
            s.gyro[2],
            s.mag[0],
            s.mag[1],
            s.mag[2]
        )?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // An empty stream still gets a header
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Drain `samples` into `sink` and finish it. Returns the number written.
pub fn write_samples<S, I>(sink: &mut S, samples: I) -> Result<usize>
where
    S: SampleSink + ?Sized,
    I: IntoIterator<Item = ImuSample>,
{
    let mut count = 0;
    for sample in samples {
        sink.write_sample(&sample)?;
        count += 1;
    }
    sink.finish()?;
    Ok(count)
}

/// Write a complete stream to a CSV file
pub fn write_csv<P: AsRef<Path>>(path: P, samples: &[ImuSample]) -> Result<()> {
    let mut writer = CsvWriter::create(path)?;
    write_samples(&mut writer, samples.iter().copied())?;
    Ok(())
}

/// Parse a CSV stream in the ingestion schema
///
/// Timestamps are converted back from milliseconds to seconds. Blank lines are
/// skipped; errors in data rows carry the line number of the offending row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ImuSample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let header = reader.headers()?;
    if !header.iter().eq(CSV_HEADER.split(',')) {
        return Err(Error::Parse(format!(
            "unexpected CSV header '{}'",
            header.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut samples = Vec::new();
    for (index, result) in reader.records().enumerate() {
        // +1 for header, +1 for 1-based lines
        let fallback_line = index + 2;
        let record = result.map_err(|e| Error::Parse(format!("line {}: {}", fallback_line, e)))?;
        let line_no = record
            .position()
            .map_or(fallback_line, |pos| pos.line() as usize);
        samples.push(parse_record(&record, line_no)?);
    }

    log::debug!("Read {} samples from CSV", samples.len());
    Ok(samples)
}

/// Read a CSV file in the ingestion schema
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ImuSample>> {
    let file = File::open(path)?;
    read_csv(file)
}

fn parse_record(record: &StringRecord, line_no: usize) -> Result<ImuSample> {
    if record.len() != COLUMN_COUNT {
        return Err(Error::Parse(format!(
            "line {}: expected {} columns, got {}",
            line_no,
            COLUMN_COUNT,
            record.len()
        )));
    }

    let mut values = [0.0f64; COLUMN_COUNT];
    for (i, (field, column)) in record.iter().zip(CSV_HEADER.split(',')).enumerate() {
        values[i] = field.parse().map_err(|_| {
            Error::Parse(format!(
                "line {}: invalid {} value '{}'",
                line_no, column, field
            ))
        })?;
    }

    Ok(ImuSample::new(
        values[0] / 1000.0,
        [values[1], values[2], values[3]],
        [values[4], values[5], values[6]],
        [values[7], values[8], values[9]],
    ))
}
