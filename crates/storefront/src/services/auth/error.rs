//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] quickmart_core::EmailError),

    /// Password was empty.
    #[error("password is required")]
    MissingPassword,

    /// Display name was empty.
    #[error("name is required")]
    MissingName,

    /// The session could not be written or removed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}
