//! Game error types.

use crate::net::ApiError;
use thiserror::Error;

/// Errors raised by the deck simulation and its guard layer.
///
/// Validation variants are raised synchronously before any network call and
/// carry a stable code via [`GameError::code`].
#[derive(Debug, Error)]
pub enum GameError {
    /// No authenticated session
    #[error("Sign in before interacting with the deck")]
    AuthRequired,

    /// No current room selected
    #[error("Join a room before interacting with the deck")]
    RoomRequired,

    /// Draw attempted on an empty deck
    #[error("The deck is empty")]
    DeckEmpty,

    /// The card listing request failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl GameError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::AuthRequired => "AUTH_REQUIRED",
            GameError::RoomRequired => "ROOM_REQUIRED",
            GameError::DeckEmpty => "DECK_EMPTY",
            GameError::Api(_) => "API_ERROR",
        }
    }
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
