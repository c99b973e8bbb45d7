//! Export service - dual-format order history export
//!
//! Writes the accumulated records to a structured JSON document and a
//! flat CSV table. The two sinks are independent: a failed write on
//! one never prevents the attempt on the other.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::result::Result;
use crate::domain::OrderLineRecord;

/// Outcome of one sink write.
#[derive(Debug)]
pub struct SinkReport {
    pub path: PathBuf,
    pub error: Option<String>,
}

impl SinkReport {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a full export. `sinks` is empty when there was nothing
/// to write - a "nothing found" run, which is a success, not an error.
#[derive(Debug)]
pub struct ExportReport {
    pub records: usize,
    pub sinks: Vec<SinkReport>,
}

impl ExportReport {
    pub fn nothing_found(&self) -> bool {
        self.records == 0
    }
}

/// Export service
pub struct ExportService {
    json_path: PathBuf,
    csv_path: PathBuf,
}

impl ExportService {
    pub fn new(json_path: PathBuf, csv_path: PathBuf) -> Self {
        Self {
            json_path,
            csv_path,
        }
    }

    /// Write the records to both sinks. With no records, no files are
    /// produced at all.
    pub fn export(&self, records: &[OrderLineRecord]) -> ExportReport {
        if records.is_empty() {
            return ExportReport {
                records: 0,
                sinks: Vec::new(),
            };
        }

        let sinks = vec![
            sink_report(&self.json_path, write_json(&self.json_path, records)),
            sink_report(&self.csv_path, write_csv(&self.csv_path, records)),
        ];

        ExportReport {
            records: records.len(),
            sinks,
        }
    }
}

fn sink_report(path: &Path, result: Result<()>) -> SinkReport {
    SinkReport {
        path: path.to_path_buf(),
        error: result.err().map(|e| e.to_string()),
    }
}

/// Ordered array of record objects, indented, numeric fields as
/// numbers.
fn write_json(path: &Path, records: &[OrderLineRecord]) -> Result<()> {
    let body = serde_json::to_string_pretty(records)?;
    fs::write(path, body)?;
    Ok(())
}

/// Header row in record field order, one data row per record, rows in
/// discovery order.
fn write_csv(path: &Path, records: &[OrderLineRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
