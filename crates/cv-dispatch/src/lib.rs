//! `cv-dispatch`: deciding and simulating individual trips.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`matcher`]  | `match_request` → `Match::{Found, NoGoods, NoMatch}`      |
//! | [`selector`] | `select_courier`: reuse an idle courier or synthesize one |
//! | [`travel`]   | `traverse`: stamina, refuel stops, transit events         |
//! | [`events`]   | `EventKind`, `Event`, time-ordered `EventLog`             |
//! | [`error`]    | `DispatchError`, `DispatchResult<T>`                      |
//!
//! Nothing here owns simulation state; the event loop in `cv-sim` lends
//! depots, the courier arena, and the event log to these functions.

pub mod error;
pub mod events;
pub mod matcher;
pub mod selector;
pub mod travel;


pub use error::{DispatchError, DispatchResult};
pub use events::{Event, EventKind, EventLog};
pub use matcher::{match_request, trip_overhead, Assignment, Match};
pub use selector::{draw_can_qualify, find_idle, select_courier};
pub use travel::traverse;
