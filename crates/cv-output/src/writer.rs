//! The `EventWriter` trait implemented by all sinks.

use crate::row::{EventRow, SummaryRow, TypeRow};
use crate::OutputResult;

/// Trait implemented by the CSV, console, and tee sinks.
///
/// Errors are stored by [`OutputObserver`][crate::OutputObserver] and
/// retrieved with `take_error` after the run.
pub trait EventWriter {
    /// Write one flushed event.  Called in `(time, seq)` order.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write the run summary and the per-type spawn counts.
    fn write_summary(&mut self, summary: &SummaryRow, types: &[TypeRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// An absent sink: every call succeeds and writes nothing.
impl<W: EventWriter> EventWriter for Option<W> {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_event(row))
    }

    fn write_summary(&mut self, summary: &SummaryRow, types: &[TypeRow]) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_summary(summary, types))
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.finish())
    }
}
