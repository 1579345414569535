//! Session persistence and the logout cascade.

use std::sync::Arc;

use log::{error, warn};

use super::{
    errors::SessionResult,
    models::{Session, User},
};
use crate::game::GameManager;
use crate::net::{ApiClient, ApiError};
use crate::rooms::RoomManager;
use crate::storage::{Storage, keys};
use crate::store::Store;
use crate::validate;

/// Persists the session across restarts and tears down derived state when
/// it ends.
///
/// Ending a session always clears the current room and resets the card
/// engine; starting one never joins a room by itself.
pub struct SessionManager {
    store: Arc<Store>,
    api: Arc<ApiClient>,
    storage: Arc<dyn Storage>,
    rooms: Arc<RoomManager>,
    game: Arc<GameManager>,
}

impl SessionManager {
    pub fn new(
        store: Arc<Store>,
        api: Arc<ApiClient>,
        storage: Arc<dyn Storage>,
        rooms: Arc<RoomManager>,
        game: Arc<GameManager>,
    ) -> Self {
        Self {
            store,
            api,
            storage,
            rooms,
            game,
        }
    }

    /// Restore a persisted session, if one exists and parses.
    ///
    /// A missing or corrupt value is treated as "no session": both keys are
    /// removed and `None` is returned. Corruption never propagates.
    pub fn restore(&self) -> Option<Session> {
        let token = self.storage.get(keys::AUTH_TOKEN);
        let user_raw = self.storage.get(keys::USER);

        let (token, user_raw) = match (token, user_raw) {
            (Some(token), Some(user_raw)) => (token, user_raw),
            _ => {
                self.storage.remove(keys::AUTH_TOKEN);
                self.storage.remove(keys::USER);
                return None;
            }
        };

        let user: User = match serde_json::from_str(&user_raw) {
            Ok(user) => user,
            Err(err) => {
                warn!("discarding corrupt persisted session: {err}");
                self.storage.remove(keys::AUTH_TOKEN);
                self.storage.remove(keys::USER);
                return None;
            }
        };

        self.api.set_token(Some(token.clone()));
        self.store.set_token(Some(token.clone()));
        self.store.set_user(Some(user.clone()));
        Some(Session { token, user })
    }

    /// Install or clear the session.
    ///
    /// With both parts present the session is persisted and published. With
    /// either absent, everything derived from the session is torn down:
    /// storage, store, API token, room selection, and the card engine.
    pub fn apply(&self, token: Option<String>, user: Option<User>) {
        match (token, user) {
            (Some(token), Some(user)) => match serde_json::to_string(&user) {
                Ok(user_raw) => {
                    self.storage.set(keys::AUTH_TOKEN, &token);
                    self.storage.set(keys::USER, &user_raw);
                    self.api.set_token(Some(token.clone()));
                    self.store.set_token(Some(token));
                    self.store.set_user(Some(user));
                }
                Err(err) => {
                    error!("failed to serialize user for persistence: {err}");
                    self.clear();
                }
            },
            _ => self.clear(),
        }
    }

    fn clear(&self) {
        self.storage.remove(keys::AUTH_TOKEN);
        self.storage.remove(keys::USER);
        self.api.set_token(None);
        self.store.set_token(None);
        self.store.set_user(None);
        self.rooms.clear_selection();
        self.game.reset();
    }

    /// Login with the guest provider and install the resulting session.
    pub async fn login(&self, display_name: &str, password: &str) -> SessionResult<User> {
        validate::validate_username(display_name)?;
        let auth = self.api.login_guest(display_name.trim(), password).await?;
        self.apply(Some(auth.token), Some(auth.user.clone()));
        Ok(auth.user)
    }

    /// Register a guest account and install the resulting session.
    pub async fn register(&self, display_name: &str, password: &str) -> SessionResult<User> {
        validate::validate_username(display_name)?;
        let auth = self.api.register_guest(display_name.trim(), password).await?;
        self.apply(Some(auth.token), Some(auth.user.clone()));
        Ok(auth.user)
    }

    /// Explicit logout.
    pub fn logout(&self) {
        self.apply(None, None);
    }

    /// React to an authentication-failed signal from the transport layer.
    /// Identical to an explicit logout.
    pub fn handle_unauthorized(&self) {
        warn!("server rejected the session token, logging out");
        self.logout();
    }

    /// Run the 401 cascade when `err` is an authentication failure.
    /// Returns whether the session was torn down.
    pub fn handle_api_error(&self, err: &ApiError) -> bool {
        if err.is_unauthorized() {
            self.handle_unauthorized();
            return true;
        }
        false
    }

    /// Persist and publish the preferred UI language.
    pub fn set_language(&self, language: &str) {
        self.storage.set(keys::LANGUAGE, language);
        self.store.set_language(language);
    }

    /// Persist the API base URL and point the client at it.
    pub fn set_api_base(&self, api_base: &str) {
        self.storage.set(keys::API_BASE, api_base);
        self.api.set_base_url(api_base);
        self.store.set_api_base(api_base);
    }

    /// Load persisted preferences (language, API base) into the store and
    /// the API client. Separate from [`SessionManager::restore`] so
    /// preferences survive a cleared session.
    pub fn restore_preferences(&self) {
        if let Some(language) = self.storage.get(keys::LANGUAGE) {
            self.store.set_language(&language);
        }
        if let Some(api_base) = self.storage.get(keys::API_BASE) {
            self.api.set_base_url(&api_base);
            self.store.set_api_base(&api_base);
        }
    }
}
