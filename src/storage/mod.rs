//! Key-value persistence seam.
//!
//! The engine persists a handful of independent string values (auth token,
//! serialized user, current room code, language preference, API base URL)
//! and restores them across restarts. The backing store is injected so the
//! embedding surface can map it onto whatever storage it has; tests use
//! [`MemoryStorage`].

use parking_lot::Mutex;
use std::collections::HashMap;

/// Well-known storage keys, each independently settable and clearable.
pub mod keys {
    /// Bearer token for the authenticated user.
    pub const AUTH_TOKEN: &str = "cardroom.token";
    /// JSON-encoded current user.
    pub const USER: &str = "cardroom.user";
    /// Code of the room the client believes it occupies.
    pub const ROOM_CODE: &str = "cardroom.room_code";
    /// Admin bearer token. Session-scoped by convention; the embedding
    /// surface should back this key with short-lived storage.
    pub const ADMIN_TOKEN: &str = "cardroom.admin_token";
    /// Preferred UI language.
    pub const LANGUAGE: &str = "cardroom.language";
    /// Base URL of the game server API.
    pub const API_BASE: &str = "cardroom.api_base";
}

/// Backing store for persisted client state.
pub trait Storage: Send + Sync {
    /// Read the value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove `key` entirely.
    fn remove(&self, key: &str);
}

/// In-memory [`Storage`] implementation.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}
