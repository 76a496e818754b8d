//! Terminal outcome and run statistics.

use std::fmt;
use std::time::Duration;

use cv_core::{RequestId, SimTime, TargetId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Succeeded => "SUCCEEDED",
            Outcome::Failed    => "FAILED",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// No depot had the goods and the next resupply comes too late.
    NoGoods,
    /// Goods exist but no route, type and courier combination fits.
    NoFeasibleMatch,
    /// The chosen depot could not synthesize a courier fast or
    /// far-ranging enough for the trip.
    NoCourier,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureReason::NoGoods         => "no goods before the deadline",
            FailureReason::NoFeasibleMatch => "no feasible route and courier",
            FailureReason::NoCourier       => "no courier could be synthesized for the trip",
        })
    }
}

/// The request that ended a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    pub request: RequestId,
    pub target:  TargetId,
    pub time:    SimTime,
    pub reason:  FailureReason,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request {} for target {} at {}: {}",
            self.request.0, self.target.0, self.time, self.reason
        )
    }
}

/// Couriers synthesized for one breed.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeCount {
    pub name:            String,
    pub herd_proportion: f64,
    pub spawned:         usize,
}

/// Everything a finished run reports.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub outcome:             Outcome,
    pub failure:             Option<Failure>,
    /// Simulated time of the last processed event.
    pub end_time:            SimTime,
    pub requests_served:     usize,
    pub deferrals:           usize,
    /// Couriers ever synthesized, including idle reserves.
    pub couriers_spawned:    usize,
    /// Distinct couriers that made at least one trip.
    pub couriers_dispatched: usize,
    pub trips:               usize,
    /// In catalog (descending efficiency) order.
    pub spawned_per_type:    Vec<TypeCount>,
    /// Wall-clock time spent in `Sim::run`.
    pub elapsed:             Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "outcome:          {}", self.outcome)?;
        if let Some(failure) = &self.failure {
            writeln!(f, "failure:          {failure}")?;
        }
        writeln!(f, "elapsed:          {:.3} ms", self.elapsed.as_secs_f64() * 1e3)?;
        writeln!(f, "simulated until:  {}", self.end_time)?;
        writeln!(f, "requests served:  {} ({} deferrals)", self.requests_served, self.deferrals)?;
        writeln!(
            f,
            "couriers spawned: {} ({} dispatched over {} trips)",
            self.couriers_spawned, self.couriers_dispatched, self.trips
        )?;
        for t in &self.spawned_per_type {
            writeln!(f, "  {} [{:.3}]: {}", t.name, t.herd_proportion, t.spawned)?;
        }
        Ok(())
    }
}
