//! `Request`: a time-boxed goods order issued by a target.

use cv_core::{RequestId, SimTime, TargetId};

/// A pending delivery order.
///
/// `deferred_until` starts at `arrival_time` and only ever moves forward.
/// The request can still be served while `deferred_until < deadline()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id:              RequestId,
    pub arrival_time:    SimTime,
    /// Time allowed after arrival.
    pub timeout:         f64,
    pub target:          TargetId,
    pub remaining_goods: u32,
    deferred_until:      SimTime,
}

impl Request {
    pub fn new(id: RequestId, arrival_time: SimTime, target: TargetId, goods: u32, timeout: f64) -> Self {
        Self {
            id,
            arrival_time,
            timeout,
            target,
            remaining_goods: goods,
            deferred_until: arrival_time,
        }
    }

    /// `arrival_time + timeout`.
    #[inline]
    pub fn deadline(&self) -> SimTime {
        self.arrival_time + self.timeout
    }

    #[inline]
    pub fn deferred_until(&self) -> SimTime {
        self.deferred_until
    }

    /// Time left before the deadline, measured from `deferred_until`.
    #[inline]
    pub fn slack(&self) -> f64 {
        self.deadline() - self.deferred_until
    }

    /// Time left before the deadline, measured from `now`.
    #[inline]
    pub fn window(&self, now: SimTime) -> f64 {
        self.deadline() - now
    }

    pub fn is_satisfiable(&self) -> bool {
        self.deferred_until < self.deadline()
    }

    /// Postpone evaluation to `time`.
    ///
    /// Fails, leaving the request untouched, when `time` is not finite, lies
    /// before the current `deferred_until`, or is not strictly before the
    /// deadline.
    pub fn defer_to(&mut self, time: SimTime) -> bool {
        if !time.is_finite() || time < self.deferred_until || time >= self.deadline() {
            return false;
        }
        self.deferred_until = time;
        true
    }

    /// Record `goods` units delivered.
    pub fn deliver(&mut self, goods: u32) {
        self.remaining_goods = self.remaining_goods.saturating_sub(goods);
    }

    #[inline]
    pub fn is_served(&self) -> bool {
        self.remaining_goods == 0
    }
}
