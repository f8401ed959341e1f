//! Per-metric CSV sink — one header write at startup, append-only rows
//! afterwards.
//!
//! The file is opened and closed on every write; no handle is held across
//! ticks, so a recording interrupted at any point leaves a complete,
//! readable file behind.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::sampler::Record;

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create (or truncate) the file and write the single header row.
    pub fn write_header(&self, columns: &[String]) -> io::Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(columns).map_err(into_io)?;
        writer.flush()
    }

    /// Append data rows. Quoting of delimiters, quotes, and newlines inside
    /// fields follows standard CSV rules.
    pub fn append(&self, records: &[Record]) -> io::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        for record in records {
            writer.write_record(&record.fields).map_err(into_io)?;
        }
        writer.flush()
    }
}

fn into_io(err: csv::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}
