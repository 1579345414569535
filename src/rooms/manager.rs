//! Room listing and current-room reconciliation.

use std::sync::Arc;

use log::debug;

use super::{
    errors::RoomResult,
    models::Room,
};
use crate::game::GameManager;
use crate::net::{ApiClient, ApiResult};
use crate::storage::{Storage, keys};
use crate::store::Store;
use crate::validate;

/// Tracks which room the client currently occupies.
///
/// The persisted room code is only a hint; every listing from the server is
/// reconciled against it, and the server's membership flags win. A change of
/// the selected code invalidates any in-progress deck state, since cards are
/// scoped to a room session.
pub struct RoomManager {
    store: Arc<Store>,
    api: Arc<ApiClient>,
    storage: Arc<dyn Storage>,
    game: Arc<GameManager>,
}

/// Pick the authoritative current room from a listing.
///
/// Priority: the joined room matching `hint`, else the first joined room in
/// listing order (server-defined, not re-sorted), else none. Rooms the hint
/// names but the server does not mark as joined are ignored.
pub fn reconcile(rooms: &[Room], hint: Option<&str>) -> Option<String> {
    if let Some(hint) = hint {
        if let Some(room) = rooms
            .iter()
            .find(|room| room.is_joined && room.code == hint)
        {
            return Some(room.code.clone());
        }
    }
    rooms
        .iter()
        .find(|room| room.is_joined)
        .map(|room| room.code.clone())
}

impl RoomManager {
    pub fn new(
        store: Arc<Store>,
        api: Arc<ApiClient>,
        storage: Arc<dyn Storage>,
        game: Arc<GameManager>,
    ) -> Self {
        Self {
            store,
            api,
            storage,
            game,
        }
    }

    /// Load the persisted room code into the store without touching the
    /// engine. Called once at startup, before any listing is available.
    pub fn restore(&self) {
        let code = self.storage.get(keys::ROOM_CODE);
        self.store.set_current_room(code);
    }

    /// Reconcile a fresh listing against the persisted hint and publish the
    /// result.
    ///
    /// If the selected code differs from the previous one, the card engine
    /// is reset exactly once. The new code (or its absence) is persisted
    /// before this returns.
    pub fn sync_rooms(&self, rooms: Vec<Room>) -> Option<String> {
        let hint = self.store.current_room();
        let selected = reconcile(&rooms, hint.as_deref());
        self.store.set_rooms(rooms);
        self.apply_selection(selected.clone());
        selected
    }

    /// Persist and publish `code` as the current room, resetting the card
    /// engine when the selection actually changed.
    fn apply_selection(&self, code: Option<String>) {
        let previous = self.store.current_room();
        match code.as_deref() {
            Some(code) => self.storage.set(keys::ROOM_CODE, code),
            None => self.storage.remove(keys::ROOM_CODE),
        }
        self.store.set_current_room(code.clone());
        if previous != code {
            debug!("current room changed: {previous:?} -> {code:?}");
            self.game.reset();
        }
    }

    /// Drop the room selection without resetting the engine. Used by the
    /// session cascade, which owns the reset.
    pub(crate) fn clear_selection(&self) {
        self.storage.remove(keys::ROOM_CODE);
        self.store.set_current_room(None);
    }

    /// Fetch the room listing and reconcile against it.
    pub async fn load_rooms(&self) -> ApiResult<Vec<Room>> {
        let rooms = self.api.list_rooms().await?;
        self.sync_rooms(rooms.clone());
        Ok(rooms)
    }

    /// Create a room, select it, and refresh the listing.
    pub async fn create_room(
        &self,
        name: &str,
        max_players: u32,
        max_spectators: u32,
    ) -> RoomResult<Room> {
        validate::validate_room_name(name)?;
        validate::validate_player_limits(max_players, max_spectators)?;
        let room = self.api.create_room(name, max_players, max_spectators).await?;
        self.apply_selection(Some(room.code.clone()));
        self.load_rooms().await?;
        Ok(room)
    }

    /// Join the room identified by `code`, select it, and refresh the
    /// listing.
    pub async fn join_room(&self, code: &str) -> RoomResult<Room> {
        let room = self.api.join_room(code).await?;
        self.apply_selection(Some(room.code.clone()));
        self.load_rooms().await?;
        Ok(room)
    }
}
