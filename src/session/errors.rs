//! Session error types.

use crate::net::ApiError;
use crate::validate::ValidationError;
use thiserror::Error;

/// Errors raised by login, registration, and session restoration.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A credential field failed validation before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The auth request failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
