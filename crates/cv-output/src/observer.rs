//! `OutputObserver<W>`: bridges `SimObserver` to an `EventWriter`.

use cv_dispatch::Event;
use cv_sim::{RunSummary, SimObserver};

use crate::row::{EventRow, SummaryRow, TypeRow};
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every flushed event and the final summary
/// to any [`EventWriter`].
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct OutputObserver<W: EventWriter> {
    writer:     W,
    events:     u64,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> OutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, events: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Events handed to the writer, including failed writes.
    pub fn events_written(&self) -> u64 {
        self.events
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> SimObserver for OutputObserver<W> {
    fn on_event(&mut self, event: &Event) {
        self.events += 1;
        let result = self.writer.write_event(&EventRow::from(event));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        let types: Vec<TypeRow> = summary.spawned_per_type.iter().map(TypeRow::from).collect();
        let result = self.writer.write_summary(&SummaryRow::from(summary), &types);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
