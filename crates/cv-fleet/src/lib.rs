//! `cv-fleet`: courier breeds, courier instances, and depots.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`kind`]    | `CourierType`, efficiency-ranked `TypeCatalog`           |
//! | [`courier`] | `Courier`, `CourierStatus`, `CourierArena`               |
//! | [`depot`]   | `Depot` (goods, resupply, batch synthesis), `CourierPool`|
//! | [`error`]   | `FleetError`, `FleetResult<T>`                           |
//!
//! # Ownership
//!
//! The arena owns every courier; a depot's pool holds ids of the idle ones.
//! A courier's `status` mirrors which collection holds it, and the only
//! back-reference is `Courier::home`.

pub mod courier;
pub mod depot;
pub mod error;
pub mod kind;


pub use courier::{Courier, CourierArena, CourierStatus};
pub use depot::{CourierPool, Depot};
pub use error::{FleetError, FleetResult};
pub use kind::{CourierType, MAX_BATCH_SIZE, TypeCatalog};
