//! Error types for bakprune
//!
//! Only setup can fail with an error. Once a cleanup run starts, every
//! filesystem failure is turned into a `false` outcome plus an observer
//! event; nothing here crosses a task boundary.

use thiserror::Error;

/// Errors raised while preparing a cleanup run
#[derive(Error, Debug)]
pub enum CleanerError {
    /// The worker pool could not be created
    #[error("Failed to build worker pool: {reason}")]
    PoolBuild { reason: String },
}

impl From<rayon::ThreadPoolBuildError> for CleanerError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        CleanerError::PoolBuild {
            reason: err.to_string(),
        }
    }
}

/// Result alias for setup operations
pub type Result<T> = std::result::Result<T, CleanerError>;
