use thiserror::Error;

use cv_core::{CourierId, CvError};
use cv_dispatch::DispatchError;
use cv_fleet::FleetError;
use cv_spatial::SpatialError;

/// Faults that stop a run.  A simulated `FAILED` outcome is not one of
/// these; it is reported through [`RunSummary`](crate::RunSummary).
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CvError),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("route graph error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("ownership invariant violated for {courier}: {detail}")]
    OwnershipViolation { courier: CourierId, detail: String },
}

pub type SimResult<T> = Result<T, SimError>;
