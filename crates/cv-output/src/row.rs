//! Flat row types written by output sinks.

use cv_dispatch::Event;
use cv_sim::{RunSummary, TypeCount};
use serde::Serialize;

/// One flushed simulation event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRow {
    pub time:    f64,
    /// Insertion order; breaks ties between equal times.
    pub seq:     u64,
    pub kind:    &'static str,
    pub message: String,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            time:    event.time.0,
            seq:     event.seq,
            kind:    event.kind.label(),
            message: event.message(),
        }
    }
}

/// The run summary as one row.  `failure` is empty on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub outcome:             &'static str,
    pub failure:             String,
    pub end_time:            f64,
    pub requests_served:     usize,
    pub deferrals:           usize,
    pub couriers_spawned:    usize,
    pub couriers_dispatched: usize,
    pub trips:               usize,
    pub elapsed_ms:          f64,
}

impl From<&RunSummary> for SummaryRow {
    fn from(s: &RunSummary) -> Self {
        Self {
            outcome:             s.outcome.as_str(),
            failure:             s.failure.as_ref().map(ToString::to_string).unwrap_or_default(),
            end_time:            s.end_time.0,
            requests_served:     s.requests_served,
            deferrals:           s.deferrals,
            couriers_spawned:    s.couriers_spawned,
            couriers_dispatched: s.couriers_dispatched,
            trips:               s.trips,
            elapsed_ms:          s.elapsed.as_secs_f64() * 1e3,
        }
    }
}

/// Couriers spawned for one breed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeRow {
    pub courier_type:    String,
    pub herd_proportion: f64,
    pub spawned:         usize,
}

impl From<&TypeCount> for TypeRow {
    fn from(t: &TypeCount) -> Self {
        Self {
            courier_type:    t.name.clone(),
            herd_proportion: t.herd_proportion,
            spawned:         t.spawned,
        }
    }
}
