//! `TeeWriter<A, B>`: send everything to two sinks.

use crate::row::{EventRow, SummaryRow, TypeRow};
use crate::writer::EventWriter;
use crate::OutputResult;

/// Forwards every call to both writers.  The second writer is called even
/// when the first fails; the first error is returned.
pub struct TeeWriter<A: EventWriter, B: EventWriter> {
    pub first:  A,
    pub second: B,
}

impl<A: EventWriter, B: EventWriter> TeeWriter<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

fn both(a: OutputResult<()>, b: OutputResult<()>) -> OutputResult<()> {
    a.and(b)
}

impl<A: EventWriter, B: EventWriter> EventWriter for TeeWriter<A, B> {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        both(self.first.write_event(row), self.second.write_event(row))
    }

    fn write_summary(&mut self, summary: &SummaryRow, types: &[TypeRow]) -> OutputResult<()> {
        both(self.first.write_summary(summary, types), self.second.write_summary(summary, types))
    }

    fn finish(&mut self) -> OutputResult<()> {
        both(self.first.finish(), self.second.finish())
    }
}
