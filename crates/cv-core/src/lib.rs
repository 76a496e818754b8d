//! `cv-core`: foundational types for the `caravan` logistics simulator.
//!
//! This crate is a dependency of every other `cv-*` crate.  It has no `cv-*`
//! dependencies and minimal external ones (`rand`, `rand_distr`, and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`ids`]     | `VertexId`, `DepotId`, `TargetId`, `CourierId`, `CourierTypeId`, `RequestId` |
//! | [`geo`]     | `Point`, Euclidean and Manhattan distance                  |
//! | [`time`]    | `SimTime`, `SimClock`, `SimConfig`                          |
//! | [`rng`]     | `DepotRng` (per-depot), `SimRng` (global)                   |
//! | [`error`]   | `CvError`, `CvResult`                                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, points, and config. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CvError, CvResult};
pub use geo::Point;
pub use ids::{CourierId, CourierTypeId, DepotId, RequestId, TargetId, VertexId};
pub use rng::{DepotRng, SimRng};
pub use time::{SimClock, SimConfig, SimTime};
