//! `cv-spatial`: route graph, constrained search, and the route catalog.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `RouteGraph` (CSR adjacency), `RouteGraphBuilder`, `Place`  |
//! | [`search`]  | `PathSearch` trait, `AStarSearch`, `GreedySearch`          |
//! | [`route`]   | `Route` (depot → target point sequence with leg metrics)   |
//! | [`catalog`] | `RouteCatalog`, `DepotRoutes`: lazily cached route sets   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `RouteCatalog::precompute_all` runs on Rayon.            |
//! | `fx-hash`  | FxHash for the per-target route cache.                   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `cv-core` types.    |

pub mod catalog;
pub mod error;
pub mod graph;
pub mod route;
pub mod search;


pub use catalog::{DepotRoutes, RouteCatalog};
pub use error::{SpatialError, SpatialResult};
pub use graph::{Place, RouteGraph, RouteGraphBuilder};
pub use route::Route;
pub use search::{AStarSearch, GreedySearch, PathSearch};
