//! Error types for store operations.
//!
//! Errors are descriptive at the core level; callers map them to
//! user-facing messages where needed. Absence is not an error here:
//! lookups return `Ok(None)` and updates of unknown ids return
//! `Ok(false)`. Lines that fail to decode are skipped at the read
//! boundary and never surface as errors at all.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Core error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file read/write failed; the only class callers should
    /// treat as exceptional
    #[error("storage error: {0}")]
    Storage(String),

    /// Uniqueness violation on create (duplicate alias/email)
    #[error("{0}")]
    Conflict(String),

    /// Credential verification failed; one message for every root cause
    #[error("wrong alias or password")]
    InvalidCredentials,

    /// Password hashing or token entropy error
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Invalid caller input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}
