//! Session data models.

use serde::{Deserialize, Serialize};

/// The authenticated user, as the server reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub role: String,
}

/// An authenticated session.
///
/// Token and user always travel together; a half-populated session cannot
/// be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}
