//! The centralized reactive state store.
//!
//! A single [`Store`] instance is the source of truth for session, room
//! selection, and the published card snapshot. Components read current
//! values through accessors and write back through mutators; each mutator
//! updates one field and emits exactly one corresponding [`StoreEvent`].
//! Rendering surfaces subscribe with [`Store::on`].

mod events;

pub use events::{EventKind, StoreEvent};

use crate::admin::AdminTokenStatus;
use crate::game::entities::{Card, CardId, Snapshot};
use crate::rooms::Room;
use crate::session::User;
use log::error;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

type Handler = dyn Fn(&StoreEvent) + Send + Sync;

#[derive(Default)]
struct StoreInner {
    token: Option<String>,
    user: Option<User>,
    current_room: Option<String>,
    rooms: Vec<Room>,
    deck: Vec<Card>,
    hand: Vec<Card>,
    workspace: Vec<Card>,
    selected_card: Option<CardId>,
    language: String,
    api_base: String,
    listeners: HashMap<EventKind, Vec<Arc<Handler>>>,
}

/// Process-wide client state with a subscribe/emit mechanism.
///
/// Mutators are single synchronous steps: the field update happens under the
/// lock and handlers run after it is released, so emissions observe the new
/// value and never deadlock when a handler calls back into the store.
#[derive(Default)]
pub struct Store {
    inner: Mutex<StoreInner>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    ///
    /// Handlers run synchronously in registration order. A panicking handler
    /// is isolated and logged; the remaining handlers for the same emission
    /// still run.
    pub fn on<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.inner
            .lock()
            .listeners
            .entry(kind)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Synchronously notify every handler registered for `event`'s kind.
    pub fn emit(&self, event: StoreEvent) {
        let handlers: Vec<Arc<Handler>> = {
            let inner = self.inner.lock();
            inner
                .listeners
                .get(&event.kind())
                .map(|handlers| handlers.to_vec())
                .unwrap_or_default()
        };
        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                error!("store listener for {:?} panicked", event.kind());
            }
        }
    }

    // --- Mutators ---

    pub fn set_token(&self, token: Option<String>) {
        self.inner.lock().token = token.clone();
        self.emit(StoreEvent::TokenChanged(token));
    }

    pub fn set_user(&self, user: Option<User>) {
        self.inner.lock().user = user.clone();
        self.emit(StoreEvent::UserChanged(user));
    }

    pub fn set_current_room(&self, code: Option<String>) {
        self.inner.lock().current_room = code.clone();
        self.emit(StoreEvent::CurrentRoomChanged(code));
    }

    pub fn set_rooms(&self, rooms: Vec<Room>) {
        self.inner.lock().rooms = rooms.clone();
        self.emit(StoreEvent::RoomsUpdated(rooms));
    }

    pub fn set_deck(&self, deck: Vec<Card>) {
        self.inner.lock().deck = deck.clone();
        self.emit(StoreEvent::DeckChanged(deck));
    }

    pub fn set_hand(&self, hand: Vec<Card>) {
        self.inner.lock().hand = hand.clone();
        self.emit(StoreEvent::HandChanged(hand));
    }

    pub fn set_workspace(&self, workspace: Vec<Card>) {
        self.inner.lock().workspace = workspace.clone();
        self.emit(StoreEvent::WorkspaceChanged(workspace));
    }

    pub fn select_card(&self, card_id: Option<CardId>) {
        self.inner.lock().selected_card = card_id;
        self.emit(StoreEvent::CardSelected(card_id));
    }

    pub fn set_language(&self, language: &str) {
        self.inner.lock().language = language.to_string();
        self.emit(StoreEvent::LanguageChanged(language.to_string()));
    }

    pub fn set_admin_token_status(&self, status: AdminTokenStatus) {
        self.emit(StoreEvent::AdminTokenChanged(status));
    }

    /// Update the API base without an emission; the base URL is wiring, not
    /// rendered state.
    pub fn set_api_base(&self, api_base: &str) {
        self.inner.lock().api_base = api_base.to_string();
    }

    /// Publish all three containers of `snapshot` and drop any card
    /// selection, since the selected card may no longer be visible.
    pub fn publish_snapshot(&self, snapshot: &Snapshot) {
        self.set_deck(snapshot.deck.clone());
        self.set_hand(snapshot.hand.clone());
        self.set_workspace(snapshot.workspace.clone());
        self.select_card(None);
    }

    // --- Accessors ---

    pub fn token(&self) -> Option<String> {
        self.inner.lock().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.lock().user.clone()
    }

    pub fn current_room(&self) -> Option<String> {
        self.inner.lock().current_room.clone()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.inner.lock().rooms.clone()
    }

    pub fn deck(&self) -> Vec<Card> {
        self.inner.lock().deck.clone()
    }

    pub fn hand(&self) -> Vec<Card> {
        self.inner.lock().hand.clone()
    }

    pub fn workspace(&self) -> Vec<Card> {
        self.inner.lock().workspace.clone()
    }

    pub fn selected_card(&self) -> Option<CardId> {
        self.inner.lock().selected_card
    }

    pub fn language(&self) -> String {
        self.inner.lock().language.clone()
    }

    pub fn api_base(&self) -> String {
        self.inner.lock().api_base.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_mutator_emits_one_event_with_new_value() {
        let store = Store::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_handler = Arc::clone(&seen);

        store.on(EventKind::TokenChanged, move |event| {
            if let StoreEvent::TokenChanged(token) = event {
                seen_in_handler.lock().push(token.clone());
            }
        });

        store.set_token(Some("abc".to_string()));
        store.set_token(None);

        assert_eq!(store.token(), None);
        assert_eq!(*seen.lock(), vec![Some("abc".to_string()), None]);
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let store = Store::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            store.on(EventKind::LanguageChanged, move |_| order.lock().push(tag));
        }

        store.set_language("en");
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_panicking_handler_does_not_stop_the_rest() {
        let store = Store::new();
        let calls = Arc::new(AtomicUsize::new(0));

        store.on(EventKind::CardSelected, |_| panic!("bad listener"));
        let calls_in_handler = Arc::clone(&calls);
        store.on(EventKind::CardSelected, move |_| {
            calls_in_handler.fetch_add(1, Ordering::SeqCst);
        });

        store.select_card(Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.selected_card(), Some(3));
    }

    #[test]
    fn test_handler_may_reenter_the_store() {
        let store = Arc::new(Store::new());
        let reentrant = Arc::clone(&store);

        store.on(EventKind::UserChanged, move |event| {
            if let StoreEvent::UserChanged(None) = event {
                reentrant.set_language("en");
            }
        });

        store.set_user(None);
        assert_eq!(store.language(), "en");
    }

    #[test]
    fn test_events_are_scoped_to_their_kind() {
        let store = Store::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_handler = Arc::clone(&calls);

        store.on(EventKind::DeckChanged, move |_| {
            calls_in_handler.fetch_add(1, Ordering::SeqCst);
        });

        store.set_hand(Vec::new());
        store.set_workspace(Vec::new());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.set_deck(Vec::new());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
