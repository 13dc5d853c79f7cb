//! Sample stream persistence
//!
//! - **CSV**: the downstream ingestion format (see [`mod@csv`])
//! - **Sinks**: [`SampleSink`] decouples generation from where samples end up

pub mod csv;

pub use self::csv::{
    CSV_HEADER, CsvWriter, SampleSink, load_csv, read_csv, write_csv, write_samples,
};
