//! Console sink: events and the summary as `tracing` records.

use tracing::info;

use crate::row::{EventRow, SummaryRow, TypeRow};
use crate::writer::EventWriter;
use crate::OutputResult;

/// `tracing` target for event records, so they can be filtered separately
/// from diagnostics (`RUST_LOG=caravan::event=off`).
pub const EVENT_TARGET: &str = "caravan::event";

/// Logs every event at `info` under [`EVENT_TARGET`].  Never fails.
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    written: u64,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl EventWriter for ConsoleWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        info!(target: EVENT_TARGET, time = row.time, kind = row.kind, "{}", row.message);
        self.written += 1;
        Ok(())
    }

    fn write_summary(&mut self, summary: &SummaryRow, types: &[TypeRow]) -> OutputResult<()> {
        info!(
            target: EVENT_TARGET,
            outcome = summary.outcome,
            end_time = summary.end_time,
            served = summary.requests_served,
            spawned = summary.couriers_spawned,
            "run summary"
        );
        for t in types {
            info!(target: EVENT_TARGET, courier_type = %t.courier_type, spawned = t.spawned, "spawned per type");
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
