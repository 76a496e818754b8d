//! `cv-scenario`: scenario file ingestion.
//!
//! Turns the whitespace-delimited scenario format into typed records
//! ([`Scenario`]).  Parsing is strict: a missing token, a malformed number
//! or an out-of-range index aborts with a [`ScenarioError`] naming the
//! offending field.  No defaults are guessed.
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`lexer`]    | nested comment stripping, `Tokens` cursor       |
//! | [`scenario`] | record types, `parse_scenario`, `load_scenario` |
//! | [`error`]    | `ScenarioError`, `ScenarioResult<T>`            |

pub mod error;
pub mod lexer;
pub mod scenario;

#[cfg(test)]
mod tests;

pub use error::{ScenarioError, ScenarioResult};
pub use lexer::{strip_comments, Tokens};
pub use scenario::{load_scenario, parse_scenario, DepotRecord, RequestRecord, Scenario, TargetRecord};
