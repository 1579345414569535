//! Fully wired client engine.

use std::sync::Arc;

use crate::admin::{AdminTokenValidator, TokenVerifier};
use crate::config::ClientConfig;
use crate::game::GameManager;
use crate::net::ApiClient;
use crate::rooms::RoomManager;
use crate::session::SessionManager;
use crate::storage::Storage;
use crate::store::Store;

/// All engine components wired against one store, one API client, and one
/// storage backend.
///
/// Construction performs no I/O; call [`CardroomClient::restore`] to load
/// persisted state.
pub struct CardroomClient {
    pub store: Arc<Store>,
    pub api: Arc<ApiClient>,
    pub game: Arc<GameManager>,
    pub rooms: Arc<RoomManager>,
    pub session: Arc<SessionManager>,
    pub admin: Arc<AdminTokenValidator>,
}

impl CardroomClient {
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>) -> Self {
        let store = Arc::new(Store::new());
        let api = Arc::new(ApiClient::new(&config.api_base));
        store.set_api_base(&config.api_base);

        let game = Arc::new(GameManager::new(Arc::clone(&store), Arc::clone(&api)));
        let rooms = Arc::new(RoomManager::new(
            Arc::clone(&store),
            Arc::clone(&api),
            Arc::clone(&storage),
            Arc::clone(&game),
        ));
        let session = Arc::new(SessionManager::new(
            Arc::clone(&store),
            Arc::clone(&api),
            Arc::clone(&storage),
            Arc::clone(&rooms),
            Arc::clone(&game),
        ));
        let admin = Arc::new(AdminTokenValidator::with_timing(
            Arc::clone(&store),
            Arc::clone(&api) as Arc<dyn TokenVerifier>,
            Arc::clone(&storage),
            config.admin_debounce,
            config.admin_idle_timeout,
        ));

        Self {
            store,
            api,
            game,
            rooms,
            session,
            admin,
        }
    }

    /// Load persisted preferences, session, room hint, and admin token into
    /// the store. Must run inside a tokio runtime when an admin token is
    /// saved, since re-verifying it schedules timers.
    pub fn restore(&self) {
        self.session.restore_preferences();
        self.session.restore();
        self.rooms.restore();
        self.admin.restore();
    }
}
