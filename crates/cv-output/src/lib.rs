//! `cv-output`: event and summary sinks for the caravan simulator.
//!
//! | Sink                 | Destination                                             |
//! |----------------------|---------------------------------------------------------|
//! | [`CsvEventWriter`]   | `events.csv`, `summary.csv`, `courier_types.csv`        |
//! | [`ConsoleWriter`]    | `tracing` records under the `caravan::event` target     |
//! | [`TeeWriter`]        | two sinks at once                                       |
//!
//! All sinks implement [`EventWriter`] and are driven by
//! [`OutputObserver`], which implements `cv_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cv_output::{ConsoleWriter, CsvEventWriter, OutputObserver, TeeWriter};
//!
//! let csv = CsvEventWriter::new(Path::new("./out"))?;
//! let mut obs = OutputObserver::new(TeeWriter::new(csv, ConsoleWriter::new()));
//! let summary = sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod console;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod tee;
pub mod writer;


pub use console::{ConsoleWriter, EVENT_TARGET};
pub use csv::CsvEventWriter;
pub use error::{OutputError, OutputResult};
pub use observer::OutputObserver;
pub use row::{EventRow, SummaryRow, TypeRow};
pub use tee::TeeWriter;
pub use writer::EventWriter;
