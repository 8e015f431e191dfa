//! Renderer errors.

use thiserror::Error;

/// Errors that can occur while configuring or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Job queue capacity of {capacity} exceeded")]
    QueueCapacityExceeded { capacity: usize },

    #[error("Failed to spawn render worker: {0}")]
    Spawn(std::io::Error),

    #[error("Render worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
