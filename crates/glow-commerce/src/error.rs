//! Commerce error types.

use glow_store::StoreError;
use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Required admin form fields are missing or out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Writing to the store failed; nothing was changed.
    #[error("Error saving product: {0}")]
    Persistence(#[source] StoreError),

    /// Reading from the store failed.
    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    /// Unknown category name.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Unknown price filter key.
    #[error("Unknown price filter: {0}")]
    UnknownPriceFilter(String),

    /// Unknown sort key.
    #[error("Unknown sort option: {0}")]
    UnknownSort(String),

    /// A bundled fixture could not be parsed.
    #[error("Invalid fixture {name}: {reason}")]
    InvalidFixture { name: String, reason: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CommerceError {
    /// Whether the error is a user-facing validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CommerceError::Validation(_))
    }
}

impl From<StoreError> for CommerceError {
    fn from(e: StoreError) -> Self {
        CommerceError::Store(e)
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
