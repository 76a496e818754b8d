//! Simulation observer trait for event output and progress reporting.

use cv_core::SimTime;
use cv_dispatch::Event;
use cv_schedule::Request;

use crate::{Failure, RunSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about.
///
/// # Example: event printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_event(&mut self, event: &Event) {
///         println!("{event}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Start of a wake time, before returns and resupplies are processed.
    /// `batch` is the number of requests due.
    fn on_wake(&mut self, _time: SimTime, _batch: usize) {}

    /// One flushed event.  Events arrive in `(time, seq)` order.
    fn on_event(&mut self, _event: &Event) {}

    fn on_request_served(&mut self, _request: &Request, _time: SimTime) {}

    /// `request.deferred_until()` is the new evaluation time.
    fn on_request_deferred(&mut self, _request: &Request) {}

    fn on_failure(&mut self, _failure: &Failure) {}

    /// Called once with the final summary.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
