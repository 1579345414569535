//! Room models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Room lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Active,
    Archived,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomStatus::Active => write!(f, "active"),
            RoomStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Room visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomVisibility {
    Private,
    Public,
}

/// A game room as returned by the room listing endpoint.
///
/// `code` is the authoritative key. The client only ever reads room state;
/// a room that stops appearing in listings is gone as far as the client is
/// concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub code: String,
    pub name: String,
    pub host_user_id: String,
    pub player_count: u32,
    pub max_players: u32,
    pub spectator_count: u32,
    pub max_spectators: u32,
    pub visibility: RoomVisibility,
    pub status: RoomStatus,
    pub is_joinable: bool,
    /// Whether the authenticated user is a member of this room.
    pub is_joined: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_parses_from_listing_json() {
        let room: Room = serde_json::from_str(
            r#"{
                "code": "K7Q2",
                "name": "Evening game",
                "host_user_id": "u-17",
                "player_count": 2,
                "max_players": 4,
                "spectator_count": 0,
                "max_spectators": 6,
                "visibility": "private",
                "status": "active",
                "is_joinable": true,
                "is_joined": false,
                "created_at": "2026-08-01T10:00:00Z"
            }"#,
        )
        .expect("room should parse");
        assert_eq!(room.code, "K7Q2");
        assert_eq!(room.status, RoomStatus::Active);
        assert_eq!(room.visibility, RoomVisibility::Private);
        assert!(!room.is_joined);
    }
}
