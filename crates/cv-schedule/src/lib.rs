//! `cv-schedule`: requests and the time-ordered queues of the event loop.
//!
//! # Crate layout
//!
//! | Module            | Contents                                            |
//! |-------------------|-----------------------------------------------------|
//! | [`request`]       | `Request` with deadline, slack, and deferral        |
//! | [`request_queue`] | `RequestQueue`: `BTreeMap` keyed by `deferred_until` |
//! | [`timing`]        | `ReturnQueue`, `SupplySchedule`: min-heaps          |
//!
//! # Ordering rules
//!
//! | Queue            | Pop order                                    |
//! |------------------|----------------------------------------------|
//! | `RequestQueue`   | batch at min time; slack ascending, then id  |
//! | `ReturnQueue`    | return time ascending, then push order       |
//! | `SupplySchedule` | scheduled time ascending, then depot id      |

pub mod request;
pub mod request_queue;
pub mod timing;

#[cfg(test)]
mod tests;

pub use request::Request;
pub use request_queue::RequestQueue;
pub use timing::{ReturnQueue, SupplySchedule};
