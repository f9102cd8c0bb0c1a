//! Core error types for xfusage.

use thiserror::Error;

/// Core error type for xfusage operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from the usage API.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
