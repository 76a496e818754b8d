//! `cv-sim`: event loop orchestrator for the caravan simulator.
//!
//! # Wake loop
//!
//! ```text
//! while status == Running:
//!   ① Wake     : pop the requests sharing the smallest deferred_until;
//!                 none left → bring every courier home, flush, SUCCEEDED.
//!   ② Returns  : couriers due by now rejoin their home pool.
//!   ③ Resupply : apply every due depot resupply.
//!   ④ Flush    : events with time <= now go to the observer.
//!   ⑤ Serve    : per request, in ascending slack:
//!                   Found    → select courier (or FAILED), load, travel, repeat
//!                   NoGoods  → defer to next resupply, or FAILED
//!                   NoMatch  → FAILED
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Route precomputation runs on Rayon's thread pool.           |
//! | `fx-hash`  | FxHash for the route cache.                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cv_core::SimConfig;
//! use cv_scenario::load_scenario;
//! use cv_sim::{NoopObserver, SimBuilder};
//! use cv_spatial::AStarSearch;
//!
//! let scenario = load_scenario(path)?;
//! let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! println!("{summary}");
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod summary;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimStatus};
pub use summary::{Failure, FailureReason, Outcome, RunSummary, TypeCount};
