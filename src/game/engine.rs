//! The deck/hand/workspace simulation.

use rand::seq::SliceRandom;

use super::{
    entities::{Card, CardId, Resources, Snapshot},
    errors::{GameError, GameResult},
};

/// Owns the three card containers and the resource ledger.
///
/// Every card id lives in exactly one container at a time, and cards only
/// enter through [`CardEngine::load_deck`]. Operations return a fresh
/// [`Snapshot`] so callers can publish it without holding a reference into
/// the engine.
#[derive(Debug, Default)]
pub struct CardEngine {
    deck: Vec<Card>,
    hand: Vec<Card>,
    workspace: Vec<Card>,
    resources: Resources,
}

impl CardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty all containers and restore the starting resource ledger.
    pub fn reset(&mut self) -> Snapshot {
        self.deck.clear();
        self.hand.clear();
        self.workspace.clear();
        self.resources = Resources::default();
        self.snapshot()
    }

    /// Replace the deck with a shuffled copy of `raw_cards`, clearing the
    /// hand and workspace and resetting resources.
    ///
    /// This is the only entry point for new cards. The shuffle is `rand`'s
    /// slice shuffle (a uniform Fisher-Yates), seeded from the process RNG.
    pub fn load_deck(&mut self, raw_cards: &[Card]) -> Snapshot {
        let mut deck = raw_cards.to_vec();
        deck.shuffle(&mut rand::rng());
        self.deck = deck;
        self.hand.clear();
        self.workspace.clear();
        self.resources = Resources::default();
        self.snapshot()
    }

    /// Move one card from the top of the deck into the hand.
    ///
    /// The top of the deck is the end of the shuffled sequence; draws are
    /// LIFO with respect to that sequence.
    pub fn draw_card(&mut self) -> GameResult<Snapshot> {
        let card = self.deck.pop().ok_or(GameError::DeckEmpty)?;
        self.hand.push(card);
        Ok(self.snapshot())
    }

    /// Move `card_id` from the hand to the workspace.
    ///
    /// Silent no-op when the card is not in the hand.
    pub fn move_hand_to_workspace(&mut self, card_id: CardId) -> Snapshot {
        if let Some(idx) = self.hand.iter().position(|card| card.id == card_id) {
            let card = self.hand.remove(idx);
            self.workspace.push(card);
        }
        self.snapshot()
    }

    /// Move `card_id` from the workspace back to the hand.
    ///
    /// Silent no-op when the card is not in the workspace.
    pub fn move_workspace_to_hand(&mut self, card_id: CardId) -> Snapshot {
        if let Some(idx) = self.workspace.iter().position(|card| card.id == card_id) {
            let card = self.workspace.remove(idx);
            self.hand.push(card);
        }
        self.snapshot()
    }

    pub fn deck_count(&self) -> usize {
        self.deck.len()
    }

    /// Defensive-copy projection of the current containers and ledger.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            deck: self.deck.clone(),
            hand: self.hand.clone(),
            workspace: self.workspace.clone(),
            resources: self.resources,
            deck_count: self.deck.len(),
        }
    }
}
