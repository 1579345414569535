//! Room error types.

use crate::net::ApiError;
use crate::validate::ValidationError;
use thiserror::Error;

/// Errors raised by room operations.
#[derive(Debug, Error)]
pub enum RoomError {
    /// A field failed validation before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The room request failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for room operations
pub type RoomResult<T> = Result<T, RoomError>;
