//! Errors raised while building a scene.

use thiserror::Error;

/// Errors that can occur during scene setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Scene object capacity of {capacity} exceeded")]
    ObjectCapacityExceeded { capacity: usize },

    #[error("Scene light capacity of {capacity} exceeded")]
    LightCapacityExceeded { capacity: usize },

    #[error("Mesh vertex count {vertex_count} is not a non-zero multiple of 3")]
    InvalidMesh { vertex_count: usize },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
