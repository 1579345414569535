//! Store change events.

use crate::admin::AdminTokenStatus;
use crate::game::entities::{Card, CardId};
use crate::rooms::Room;
use crate::session::User;

/// A change notification emitted by the [`Store`](super::Store).
///
/// Every mutator emits exactly one event carrying the new value.
#[derive(Clone, Debug)]
pub enum StoreEvent {
    TokenChanged(Option<String>),
    UserChanged(Option<User>),
    CurrentRoomChanged(Option<String>),
    RoomsUpdated(Vec<Room>),
    DeckChanged(Vec<Card>),
    HandChanged(Vec<Card>),
    WorkspaceChanged(Vec<Card>),
    CardSelected(Option<CardId>),
    LanguageChanged(String),
    AdminTokenChanged(AdminTokenStatus),
}

impl StoreEvent {
    /// The subscription key for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            StoreEvent::TokenChanged(_) => EventKind::TokenChanged,
            StoreEvent::UserChanged(_) => EventKind::UserChanged,
            StoreEvent::CurrentRoomChanged(_) => EventKind::CurrentRoomChanged,
            StoreEvent::RoomsUpdated(_) => EventKind::RoomsUpdated,
            StoreEvent::DeckChanged(_) => EventKind::DeckChanged,
            StoreEvent::HandChanged(_) => EventKind::HandChanged,
            StoreEvent::WorkspaceChanged(_) => EventKind::WorkspaceChanged,
            StoreEvent::CardSelected(_) => EventKind::CardSelected,
            StoreEvent::LanguageChanged(_) => EventKind::LanguageChanged,
            StoreEvent::AdminTokenChanged(_) => EventKind::AdminTokenChanged,
        }
    }
}

/// Subscription key for [`StoreEvent`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventKind {
    TokenChanged,
    UserChanged,
    CurrentRoomChanged,
    RoomsUpdated,
    DeckChanged,
    HandChanged,
    WorkspaceChanged,
    CardSelected,
    LanguageChanged,
    AdminTokenChanged,
}
