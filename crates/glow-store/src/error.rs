//! Store error types.

use thiserror::Error;

/// Errors that can occur when using a key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("Store operation failed: {0}")]
    Backend(String),

    /// Writing the value would exceed the store's byte quota.
    #[error("Quota exceeded writing {key}: {required} bytes required, quota is {quota}")]
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },

    /// The key cannot be represented by this backend.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The store has been closed.
    #[error("Store is closed")]
    Closed,
}

impl StoreError {
    /// Whether the failure was caused by running out of space.
    pub fn is_quota(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }

    /// Whether the store was already closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, StoreError::Closed)
    }
}
