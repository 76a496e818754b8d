//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is continuous: scenario arrival times, timeouts, and travel
//! durations are all real numbers, so `SimTime` wraps an `f64`.  The loop
//! never steps by a fixed increment; it jumps straight to the next moment
//! something happens (a request batch becoming due).
//!
//! `SimTime` is totally ordered via `f64::total_cmp` so it can key
//! `BTreeMap`s and `BinaryHeap`s directly.  Both zeros compare equal.  `SimTime::INFINITY` stands for
//! "never" (e.g. the next resupply when no depot exists).

use std::cmp::Ordering;
use std::fmt;

use crate::{CvError, CvResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated timestamp.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);
    pub const INFINITY: SimTime = SimTime(f64::INFINITY);

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Nearest whole time unit, used when rendering event messages.
    #[inline]
    pub fn rounded(self) -> i64 {
        self.0.round() as i64
    }

    /// Duration from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        // Adding +0.0 turns -0.0 into +0.0 and leaves every other value alone.
        (self.0 + 0.0).total_cmp(&(other.0 + 0.0))
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<f64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: f64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_finite() {
            write!(f, "t={}", self.rounded())
        } else {
            f.write_str("t=inf")
        }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single simulated clock owned by the event loop.
///
/// Moves forward only; jumping backwards is a logic error caught in debug
/// builds.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now:   SimTime,
    wakes: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Number of distinct wake times processed so far.
    #[inline]
    pub fn wakes(&self) -> u64 {
        self.wakes
    }

    /// Jump to `time`, the next wake time of the event loop.
    pub fn advance_to(&mut self, time: SimTime) {
        debug_assert!(time >= self.now, "clock moved backwards: {} -> {}", self.now, time);
        self.now = self.now.max(time);
        self.wakes += 1;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (wake #{})", self.now, self.wakes)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level simulation configuration.
///
/// The scenario file describes the world; `SimConfig` describes how to run
/// it.  The application crate may load it from JSON (feature `serde`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// How many fresh courier batches one depot may synthesize for a single
    /// assignment before the run fails.  Only reached when every draw is
    /// unlucky; assignments no draw can meet fail before any spawning.
    pub max_spawn_rounds: u32,

    /// Lower clamp for a courier's randomly drawn range.
    pub min_courier_range: f64,

    /// Compute every target's route set up front instead of lazily on the
    /// first request for that target.
    pub precompute_routes: bool,
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_SPAWN_ROUNDS: u32 = 100_000;

    /// Reject settings the event loop cannot honour.
    pub fn validate(&self) -> CvResult<()> {
        if self.max_spawn_rounds == 0 {
            return Err(CvError::Config("max_spawn_rounds must be at least 1".into()));
        }
        if !(self.min_courier_range > 0.0 && self.min_courier_range.is_finite()) {
            return Err(CvError::Config(format!(
                "min_courier_range must be positive and finite, got {}",
                self.min_courier_range
            )));
        }
        Ok(())
    }

    /// Copy of `self` with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:              Self::DEFAULT_SEED,
            max_spawn_rounds:  Self::DEFAULT_SPAWN_ROUNDS,
            min_courier_range: 1e-3,
            precompute_routes: false,
        }
    }
}
