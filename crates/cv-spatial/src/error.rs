//! Spatial-subsystem error type.

use thiserror::Error;

use cv_core::VertexId;

/// Errors produced by `cv-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: VertexId, to: VertexId },

    #[error("vertex {0} not found in route graph")]
    VertexNotFound(VertexId),

    #[error("route graph has {vertices} vertices but {depots} depots were declared")]
    DepotCountExceedsVertices { depots: usize, vertices: usize },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
