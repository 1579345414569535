use serde::{Deserialize, Serialize};

/// Card ID type. Unique within a deck; card identity is the id alone.
pub type CardId = i64;

/// A playing card as served by the card listing endpoint.
///
/// Immutable once fetched. The five resource fields are the deltas the card
/// declares; they are displayed to the player but never applied to the
/// [`Resources`] ledger.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub time: i32,
    #[serde(default)]
    pub reputation: i32,
    #[serde(default)]
    pub discipline: i32,
    #[serde(default)]
    pub documents: i32,
    #[serde(default)]
    pub technology: i32,
}

/// Starting value for every resource counter on (re)preparation.
pub const STARTING_RESOURCE: i32 = 1;

/// The five-counter resource ledger.
///
/// Initialized to [`STARTING_RESOURCE`] on every deck load and reset. Card
/// deltas are not applied to it; there is deliberately no arithmetic API
/// here.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Resources {
    pub time: i32,
    pub reputation: i32,
    pub discipline: i32,
    pub documents: i32,
    pub technology: i32,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            time: STARTING_RESOURCE,
            reputation: STARTING_RESOURCE,
            discipline: STARTING_RESOURCE,
            documents: STARTING_RESOURCE,
            technology: STARTING_RESOURCE,
        }
    }
}

/// Read-only projection of the card engine's containers.
///
/// Every vector is a defensive copy; mutating a snapshot never touches the
/// engine's own state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// The undrawn pile, in shuffled order. Cards are drawn from the end.
    pub deck: Vec<Card>,
    /// Cards drawn but not yet staged. Order carries no meaning.
    pub hand: Vec<Card>,
    /// Cards staged for the current turn. Order carries no meaning.
    pub workspace: Vec<Card>,
    pub resources: Resources,
    pub deck_count: usize,
}
