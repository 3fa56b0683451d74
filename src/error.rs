//! Error types for the notify-rank priority engine
//!
//! This module provides error handling using thiserror for structured error
//! definitions and anyhow for error propagation at the binary boundary.
//!
//! Training on an empty dataset yields [`crate::scoring::TrainingOutcome::NoData`]
//! rather than an error; callers that need a report turn it into
//! [`RankError::NoData`] with `TrainingOutcome::into_report`. A missing model
//! makes weight stores return `Ok(None)`.

use thiserror::Error;

/// Main error type for notify-rank operations
#[derive(Error, Debug)]
pub enum RankError {
    /// Persisted weights could not be used as a model
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Blend weight outside [0, 1]
    #[error("Invalid blend weight: {0} (expected a value in [0, 1])")]
    InvalidBlendWeight(f64),

    /// Trainer parameters rejected before fitting
    #[error("Invalid training configuration: {0}")]
    InvalidTrainingConfig(String),

    /// No dataset supplied and none found in the dataset store
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    /// Training was requested on a dataset without events
    #[error("no data")]
    NoData,

    /// Settings database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for notify-rank operations
pub type Result<T> = std::result::Result<T, RankError>;

/// Convert anyhow::Error to RankError
impl From<anyhow::Error> for RankError {
    fn from(err: anyhow::Error) -> Self {
        RankError::Other(err.to_string())
    }
}
