//! Admin errors.

use glow_store::StoreError;
use thiserror::Error;

/// Admin gate error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The password did not match the shared secret.
    #[error("Invalid password. Please try again.")]
    InvalidPassword,

    /// Reading or writing the flag failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Check if this is a wrong-password failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::InvalidPassword)
    }
}

/// Product detail extraction error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No URL was entered.
    #[error("Please enter a product URL")]
    MissingUrl,

    /// The URL could not be understood.
    #[error("Failed to fetch product details. Please try again or enter details manually.")]
    Failed(String),

    /// The task was cancelled before it finished.
    #[error("extraction cancelled")]
    Cancelled,
}
