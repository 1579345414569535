//! Networking components for talking to the game server.

pub mod client;
pub mod errors;

pub use client::{ADMIN_TOKEN_HEADER, ApiClient, AuthResponse};
pub use errors::{ApiError, ApiResult};
