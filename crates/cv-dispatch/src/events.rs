//! Timestamped simulation events and the buffered log that orders them.
//!
//! Events are produced as soon as a journey is planned, which is usually
//! ahead of the clock.  The `EventLog` holds them until the event loop
//! flushes everything up to the current time, in `(time, seq)` order where
//! `seq` is the insertion counter.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use cv_core::{CourierId, DepotId, SimTime, TargetId};
use cv_spatial::Place;

// ── EventKind ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A depot received its periodic supply.
    Resupply { depot: DepotId, amount: u32 },
    /// A courier started loading; it leaves at `departs_at`.
    Load { courier: CourierId, depot: DepotId, goods: u32, departs_at: SimTime },
    /// A courier stopped to refuel and resumes at `resumes_at`.
    Refuel { courier: CourierId, place: Place, type_name: String, resumes_at: SimTime },
    /// A courier passed through `place` without stopping.
    Transit { courier: CourierId, place: Place },
    /// A courier reached its target; `slack` is the deadline minus
    /// `unloaded_at`.
    Arrival { courier: CourierId, target: TargetId, goods: u32, unloaded_at: SimTime, slack: f64 },
    /// A courier is back in its home depot's pool.
    Return { courier: CourierId, depot: DepotId },
}

impl EventKind {
    /// Short label, used as the `kind` column of tabular sinks.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Resupply { .. } => "resupply",
            EventKind::Load { .. }     => "load",
            EventKind::Refuel { .. }   => "refuel",
            EventKind::Transit { .. }  => "transit",
            EventKind::Arrival { .. }  => "arrival",
            EventKind::Return { .. }   => "return",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Resupply { depot, amount } => {
                write!(f, "depot {} restocked with {amount} units", depot.0)
            }
            EventKind::Load { courier, depot, goods, departs_at } => write!(
                f,
                "courier {} loads {goods} units at depot {} and departs at {departs_at}",
                courier.0, depot.0
            ),
            EventKind::Refuel { courier, place, type_name, resumes_at } => write!(
                f,
                "courier {} ({type_name}) refuels at {place} and resumes at {resumes_at}",
                courier.0
            ),
            EventKind::Transit { courier, place } => {
                write!(f, "courier {} passes through {place}", courier.0)
            }
            EventKind::Arrival { courier, target, goods, unloaded_at, slack } => write!(
                f,
                "courier {} delivers {goods} units to target {}, unloaded at {unloaded_at} with {slack:.3} to spare",
                courier.0, target.0
            ),
            EventKind::Return { courier, depot } => {
                write!(f, "courier {} is back at depot {}", courier.0, depot.0)
            }
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One log record.  Ordered by `(time, seq)`.
#[derive(Debug, Clone)]
pub struct Event {
    pub time: SimTime,
    pub seq:  u64,
    pub kind: EventKind,
}

impl Event {
    /// Human-readable message without the timestamp.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time, self.kind)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.cmp(&other.time).then(self.seq.cmp(&other.seq))
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// Buffer of not-yet-flushed events.
#[derive(Debug, Default)]
pub struct EventLog {
    pending: BinaryHeap<Reverse<Event>>,
    seq:     u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event at `time`.  Returns its sequence number.
    pub fn push(&mut self, time: SimTime, kind: EventKind) -> u64 {
        let seq = self.seq;
        self.pending.push(Reverse(Event { time, seq, kind }));
        self.seq += 1;
        seq
    }

    /// Remove and return every event with `time <= until`, in order.
    pub fn drain_until(&mut self, until: SimTime) -> Vec<Event> {
        let mut out = Vec::new();
        while self.pending.peek().is_some_and(|Reverse(e)| e.time <= until) {
            if let Some(Reverse(e)) = self.pending.pop() {
                out.push(e);
            }
        }
        out
    }

    /// Remove and return every buffered event, in order.
    pub fn drain_all(&mut self) -> Vec<Event> {
        self.drain_until(SimTime::INFINITY)
    }

    /// Drop every buffered event.  Returns how many were dropped.
    pub fn discard(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Total events ever recorded.
    pub fn recorded(&self) -> u64 {
        self.seq
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
