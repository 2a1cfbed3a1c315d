//! Common error types for FTV

use thiserror::Error;

/// Common result type for FTV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the FTV portal
#[derive(Error, Debug)]
pub enum Error {
    /// Remote store call failure (wraps the store client error)
    #[error("Transport error: {0}")]
    Transport(#[from] crate::store::StoreError),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
