use thiserror::Error;

use cv_core::DepotId;
use cv_fleet::FleetError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{depot} synthesized {rounds} batches without producing a suitable '{kind}' courier")]
    SpawnExhausted { depot: DepotId, kind: String, rounds: u32 },

    #[error("{depot} cannot synthesize a '{kind}' courier that fits the assignment")]
    Unattainable { depot: DepotId, kind: String },

    #[error(transparent)]
    Fleet(#[from] FleetError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
