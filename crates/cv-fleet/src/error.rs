//! Fleet error type.

use thiserror::Error;

use cv_core::{CourierId, DepotId};

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("courier type '{name}' is invalid: {reason}")]
    InvalidCourierType { name: String, reason: String },

    #[error("courier type '{0}' is declared twice")]
    DuplicateType(String),

    #[error("courier type catalog is empty")]
    EmptyCatalog,

    #[error("{depot} is invalid: {reason}")]
    InvalidDepot { depot: DepotId, reason: String },

    #[error("{depot} holds {available} units but {requested} were requested")]
    InsufficientGoods { depot: DepotId, requested: u32, available: u32 },

    #[error("courier {0} not found")]
    UnknownCourier(CourierId),
}

pub type FleetResult<T> = Result<T, FleetError>;
