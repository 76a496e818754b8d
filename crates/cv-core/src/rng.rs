//! Deterministic per-depot and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Couriers are synthesized by the depot that will own them, so each depot
//! gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (depot_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive depot IDs uniformly across the seed space.
//! Spawning at one depot therefore never perturbs the draws of another, and
//! a run is reproducible from `SimConfig::seed` alone.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::DepotId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── DepotRng ──────────────────────────────────────────────────────────────────

/// Per-depot deterministic RNG used for courier synthesis.
pub struct DepotRng(SmallRng);

impl DepotRng {
    /// Seed deterministically from the run's global seed and a depot ID.
    pub fn new(global_seed: u64, depot: DepotId) -> Self {
        let seed = global_seed ^ (depot.0 as u64).wrapping_mul(MIXING_CONSTANT);
        DepotRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform draw from the closed interval `[low, high]`.
    ///
    /// A degenerate interval (`low == high`) returns `low`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    /// Normal draw with the given mean and standard deviation.
    ///
    /// A zero deviation returns `mean` exactly.  The result is not clamped;
    /// callers apply their own floor.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(normal) if std_dev > 0.0 => normal.sample(&mut self.0),
            _ => mean,
        }
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Root of the run's randomness.  Hands out one [`DepotRng`] per depot so
/// all draws derive from `SimConfig::seed`.
pub struct SimRng {
    seed: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng { seed }
    }

    /// The per-depot generator for `depot`, seeded from this run's seed.
    pub fn depot(&self, depot: DepotId) -> DepotRng {
        DepotRng::new(self.seed, depot)
    }
}
