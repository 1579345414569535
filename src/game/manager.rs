//! Guard layer around the card engine.
//!
//! [`GameManager`] owns the engine, enforces the auth/room preconditions
//! before any deck interaction, and publishes every new snapshot into the
//! store so rendering surfaces stay in sync.

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use super::{
    engine::CardEngine,
    entities::{Card, CardId, Snapshot},
    errors::{GameError, GameResult},
};
use crate::net::ApiClient;
use crate::store::Store;

pub struct GameManager {
    store: Arc<Store>,
    api: Arc<ApiClient>,
    engine: Mutex<CardEngine>,
}

impl GameManager {
    pub fn new(store: Arc<Store>, api: Arc<ApiClient>) -> Self {
        Self {
            store,
            api,
            engine: Mutex::new(CardEngine::new()),
        }
    }

    fn ensure_auth(&self) -> GameResult<()> {
        match self.store.token() {
            Some(_) => Ok(()),
            None => Err(GameError::AuthRequired),
        }
    }

    fn ensure_room(&self) -> GameResult<()> {
        match self.store.current_room() {
            Some(_) => Ok(()),
            None => Err(GameError::RoomRequired),
        }
    }

    fn publish(&self, snapshot: Snapshot) -> Snapshot {
        self.store.publish_snapshot(&snapshot);
        snapshot
    }

    /// Empty the deck, hand, and workspace and restore starting resources.
    /// Always succeeds and requires no session.
    pub fn reset(&self) -> Snapshot {
        let snapshot = self.engine.lock().reset();
        self.publish(snapshot)
    }

    /// Read-only view of the current containers and ledger.
    pub fn snapshot(&self) -> Snapshot {
        self.engine.lock().snapshot()
    }

    /// Replace the deck with a shuffled copy of `cards` and publish.
    pub fn load_deck(&self, cards: &[Card]) -> Snapshot {
        let snapshot = self.engine.lock().load_deck(cards);
        self.publish(snapshot)
    }

    /// Fetch the card listing for `deck_id` and load it as the new deck.
    ///
    /// Requires an authenticated session and a current room; cards are
    /// scoped to the room session they were prepared for.
    pub async fn prepare(&self, deck_id: Option<&str>) -> GameResult<Snapshot> {
        self.ensure_auth()?;
        self.ensure_room()?;
        let cards = self.api.fetch_cards(deck_id).await?;
        debug!("prepared deck with {} cards", cards.len());
        Ok(self.load_deck(&cards))
    }

    /// Draw the top card of the deck into the hand.
    pub fn draw_card(&self) -> GameResult<Snapshot> {
        self.ensure_auth()?;
        self.ensure_room()?;
        let snapshot = self.engine.lock().draw_card()?;
        Ok(self.publish(snapshot))
    }

    /// Stage a card from the hand into the workspace.
    pub fn move_hand_to_workspace(&self, card_id: CardId) -> GameResult<Snapshot> {
        self.ensure_auth()?;
        self.ensure_room()?;
        let snapshot = self.engine.lock().move_hand_to_workspace(card_id);
        Ok(self.publish(snapshot))
    }

    /// Return a staged card from the workspace to the hand.
    pub fn move_workspace_to_hand(&self, card_id: CardId) -> GameResult<Snapshot> {
        self.ensure_auth()?;
        self.ensure_room()?;
        let snapshot = self.engine.lock().move_workspace_to_hand(card_id);
        Ok(self.publish(snapshot))
    }
}
