//! Min-heaps for in-flight courier returns and depot resupplies.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cv_core::{CourierId, DepotId, SimTime};

// ── ReturnQueue ───────────────────────────────────────────────────────────────

/// Couriers on their way home, ordered by return time.
///
/// Equal return times pop in push order.
#[derive(Debug, Default)]
pub struct ReturnQueue {
    heap: BinaryHeap<Reverse<(SimTime, u64, CourierId)>>,
    seq:  u64,
}

impl ReturnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: SimTime, courier: CourierId) {
        self.heap.push(Reverse((time, self.seq, courier)));
        self.seq += 1;
    }

    /// Pop every courier due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: SimTime) -> Vec<(SimTime, CourierId)> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|Reverse((t, _, _))| *t <= now) {
            if let Some(Reverse((time, _, courier))) = self.heap.pop() {
                due.push((time, courier));
            }
        }
        due
    }

    /// Pop everything regardless of time, earliest first.
    pub fn drain_all(&mut self) -> Vec<(SimTime, CourierId)> {
        self.pop_due(SimTime::INFINITY)
    }

    pub fn next_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse((t, _, _))| *t)
    }

    /// Couriers currently queued, in no particular order.
    pub fn couriers(&self) -> impl Iterator<Item = CourierId> + '_ {
        self.heap.iter().map(|Reverse((_, _, c))| *c)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

// ── SupplySchedule ────────────────────────────────────────────────────────────

/// Next scheduled resupply of every depot, earliest first, ties by depot id.
///
/// The caller pops one due entry, applies it, and pushes the depot's next
/// time back; a depot overdue by several periods therefore pops once per
/// period.
#[derive(Debug, Default)]
pub struct SupplySchedule {
    heap: BinaryHeap<Reverse<(SimTime, DepotId)>>,
}

impl SupplySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: SimTime, depot: DepotId) {
        self.heap.push(Reverse((time, depot)));
    }

    /// Pop the earliest entry if it is due at or before `now`.
    pub fn pop_due(&mut self, now: SimTime) -> Option<(SimTime, DepotId)> {
        if self.heap.peek().is_some_and(|Reverse((t, _))| *t <= now) {
            self.heap.pop().map(|Reverse(e)| e)
        } else {
            None
        }
    }

    /// Earliest scheduled resupply, or `SimTime::INFINITY` when none.
    pub fn next_time(&self) -> SimTime {
        self.heap.peek().map_or(SimTime::INFINITY, |Reverse((t, _))| *t)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl FromIterator<(SimTime, DepotId)> for SupplySchedule {
    fn from_iter<I: IntoIterator<Item = (SimTime, DepotId)>>(iter: I) -> Self {
        Self { heap: iter.into_iter().map(Reverse).collect() }
    }
}
