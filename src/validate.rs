//! Field validation with stable error codes.
//!
//! These checks run before any network call; a failing field is always
//! recoverable by correcting the input and retrying.

use thiserror::Error;

/// Bounds for guest display names.
pub const USERNAME_MIN: usize = 2;
pub const USERNAME_MAX: usize = 20;

/// Bounds for room names.
pub const ROOM_NAME_MIN: usize = 2;
pub const ROOM_NAME_MAX: usize = 32;

/// Player and spectator limits per room.
pub const MAX_PLAYERS: u32 = 10;
pub const MAX_SPECTATORS: u32 = 10;

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}

impl ValidationError {
    /// Stable machine-readable code, `<FIELD>_<REASON>`.
    pub fn code(&self) -> String {
        match self {
            ValidationError::Required { field } => format!("{}_REQUIRED", field.to_uppercase()),
            ValidationError::TooShort { field, .. } => {
                format!("{}_TOO_SHORT", field.to_uppercase())
            }
            ValidationError::TooLong { field, .. } => format!("{}_TOO_LONG", field.to_uppercase()),
            ValidationError::OutOfRange { field, .. } => {
                format!("{}_OUT_OF_RANGE", field.to_uppercase())
            }
        }
    }
}

fn validate_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if trimmed.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Validate a guest display name.
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    validate_length("username", value, USERNAME_MIN, USERNAME_MAX)
}

/// Validate a room name.
pub fn validate_room_name(value: &str) -> Result<(), ValidationError> {
    validate_length("room", value, ROOM_NAME_MIN, ROOM_NAME_MAX)
}

/// Validate the player/spectator limits for a new room.
pub fn validate_player_limits(players: u32, spectators: u32) -> Result<(), ValidationError> {
    if players < 1 || players > MAX_PLAYERS {
        return Err(ValidationError::OutOfRange {
            field: "players",
            min: 1,
            max: MAX_PLAYERS,
        });
    }
    if spectators > MAX_SPECTATORS {
        return Err(ValidationError::OutOfRange {
            field: "spectators",
            min: 0,
            max: MAX_SPECTATORS,
        });
    }
    Ok(())
}
