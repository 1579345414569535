//! Admin access error types.

use thiserror::Error;

/// Errors raised when admin operations are attempted without a usable token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    /// No admin token entered
    #[error("An admin token is required")]
    TokenRequired,

    /// The entered token has not passed verification
    #[error("The admin token has not been verified")]
    TokenInvalid,
}

impl AdminError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AdminError::TokenRequired => "ADMIN_TOKEN_REQUIRED",
            AdminError::TokenInvalid => "ADMIN_TOKEN_INVALID",
        }
    }
}

/// Result type for admin access checks
pub type AdminResult<T> = Result<T, AdminError>;
