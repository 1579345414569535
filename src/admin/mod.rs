//! Admin token validation and idle expiry.

pub mod errors;
pub mod validator;

pub use errors::{AdminError, AdminResult};
pub use validator::{
    AdminTokenStatus, AdminTokenValidator, DEFAULT_DEBOUNCE, DEFAULT_IDLE_TIMEOUT, TokenPhase,
    TokenVerifier,
};
