//! CSV file sink.
//!
//! Creates three files in the output directory:
//! - `events.csv`
//! - `summary.csv`
//! - `courier_types.csv`

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::row::{EventRow, SummaryRow, TypeRow};
use crate::writer::EventWriter;
use crate::OutputResult;

const EVENT_HEADER: [&str; 4] = ["time", "seq", "kind", "message"];

const SUMMARY_HEADER: [&str; 9] = [
    "outcome",
    "failure",
    "end_time",
    "requests_served",
    "deferrals",
    "couriers_spawned",
    "couriers_dispatched",
    "trips",
    "elapsed_ms",
];

const TYPE_HEADER: [&str; 3] = ["courier_type", "herd_proportion", "spawned"];

/// Writes events and the run summary to CSV files.
pub struct CsvEventWriter {
    events:   Writer<File>,
    summary:  Writer<File>,
    types:    Writer<File>,
    finished: bool,
}

impl CsvEventWriter {
    /// Create the output directory if needed, open the three files, and
    /// write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            events:   open(&dir.join("events.csv"), &EVENT_HEADER)?,
            summary:  open(&dir.join("summary.csv"), &SUMMARY_HEADER)?,
            types:    open(&dir.join("courier_types.csv"), &TYPE_HEADER)?,
            finished: false,
        })
    }
}

fn open(path: &Path, header: &[&str]) -> OutputResult<Writer<File>> {
    // Headers are written by hand so empty files still carry them.
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(header)?;
    Ok(w)
}

impl EventWriter for CsvEventWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.serialize(row)?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &SummaryRow, types: &[TypeRow]) -> OutputResult<()> {
        self.summary.serialize(summary)?;
        for row in types {
            self.types.serialize(row)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summary.flush()?;
        self.types.flush()?;
        Ok(())
    }
}
