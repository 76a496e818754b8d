//! Core error type.
//!
//! Sub-crates define their own error enums and either convert into `CvError`
//! or wrap it as one variant, whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `cv-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `cv-core`.
pub type CvResult<T> = Result<T, CvError>;
