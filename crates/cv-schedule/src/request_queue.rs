//! `RequestQueue`: pending requests keyed by their evaluation time.
//!
//! Requests are bucketed by `deferred_until` in a `BTreeMap`, so the event
//! loop pops every request due at the earliest wake time in one call, the
//! same way a wake queue drains all agents of one tick.

use std::collections::BTreeMap;

use cv_core::SimTime;

use crate::Request;

#[derive(Debug, Default)]
pub struct RequestQueue {
    inner: BTreeMap<SimTime, Vec<Request>>,
    /// Cached request count for O(1) `len()`.
    total: usize,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue at the request's current `deferred_until`.
    pub fn push(&mut self, request: Request) {
        self.inner.entry(request.deferred_until()).or_default().push(request);
        self.total += 1;
    }

    /// Remove every request sharing the minimum evaluation time.
    ///
    /// The batch is ordered by ascending slack, ties by request id.
    pub fn pop_batch(&mut self) -> Option<(SimTime, Vec<Request>)> {
        let (time, mut batch) = self.inner.pop_first()?;
        self.total -= batch.len();
        batch.sort_by(|a, b| a.slack().total_cmp(&b.slack()).then(a.id.cmp(&b.id)));
        Some((time, batch))
    }

    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl FromIterator<Request> for RequestQueue {
    fn from_iter<I: IntoIterator<Item = Request>>(iter: I) -> Self {
        let mut queue = Self::new();
        for request in iter {
            queue.push(request);
        }
        queue
    }
}
