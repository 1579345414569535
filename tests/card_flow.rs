//! Property and scenario tests for the deck simulation.

use cardroom_client::game::{Card, CardEngine, CardId, Resources};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn card(id: CardId) -> Card {
    Card {
        id,
        name: format!("card-{id}"),
        description: format!("description for {id}"),
        category: None,
        time: 0,
        reputation: 0,
        discipline: 0,
        documents: 0,
        technology: 0,
    }
}

fn cards(n: i64) -> Vec<Card> {
    (1..=n).map(card).collect()
}

/// One step of a deck interaction sequence.
#[derive(Clone, Debug)]
enum Op {
    Draw,
    /// Move the hand card at this (modular) position to the workspace.
    Stage(usize),
    /// Move the workspace card at this (modular) position back to the hand.
    Unstage(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Draw),
        (0usize..16).prop_map(Op::Stage),
        (0usize..16).prop_map(Op::Unstage),
    ]
}

fn assert_conserved(engine: &CardEngine, total: usize) {
    let snapshot = engine.snapshot();
    assert_eq!(
        snapshot.deck.len() + snapshot.hand.len() + snapshot.workspace.len(),
        total
    );
    let ids: BTreeSet<CardId> = snapshot
        .deck
        .iter()
        .chain(snapshot.hand.iter())
        .chain(snapshot.workspace.iter())
        .map(|c| c.id)
        .collect();
    assert_eq!(ids.len(), total, "a card id appeared in more than one container");
}

proptest! {
    #[test]
    fn conservation_holds_for_any_operation_sequence(
        deck_size in 0i64..20,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut engine = CardEngine::new();
        engine.load_deck(&cards(deck_size));
        let total = deck_size as usize;

        for op in ops {
            match op {
                Op::Draw => {
                    // Drawing from an empty deck fails and must not mutate.
                    let _ = engine.draw_card();
                }
                Op::Stage(pos) => {
                    let hand = engine.snapshot().hand;
                    let id = hand.get(pos % hand.len().max(1)).map(|c| c.id).unwrap_or(-1);
                    engine.move_hand_to_workspace(id);
                }
                Op::Unstage(pos) => {
                    let workspace = engine.snapshot().workspace;
                    let id = workspace.get(pos % workspace.len().max(1)).map(|c| c.id).unwrap_or(-1);
                    engine.move_workspace_to_hand(id);
                }
            }
            assert_conserved(&engine, total);
        }
    }

    #[test]
    fn load_deck_always_yields_the_same_multiset(deck_size in 1i64..30) {
        let raw = cards(deck_size);
        let mut engine = CardEngine::new();
        let snapshot = engine.load_deck(&raw);

        let loaded: BTreeSet<CardId> = snapshot.deck.iter().map(|c| c.id).collect();
        let expected: BTreeSet<CardId> = raw.iter().map(|c| c.id).collect();
        prop_assert_eq!(loaded, expected);
        prop_assert_eq!(snapshot.deck_count, deck_size as usize);
    }
}

#[test]
fn three_card_session_walkthrough() {
    let mut engine = CardEngine::new();

    let loaded = engine.load_deck(&cards(3));
    assert_eq!(loaded.deck_count, 3);
    assert!(loaded.hand.is_empty());
    assert!(loaded.workspace.is_empty());

    let drawn = engine.draw_card().expect("deck has cards");
    assert_eq!(drawn.deck_count, 2);
    assert_eq!(drawn.hand.len(), 1);

    let staged = engine.move_hand_to_workspace(drawn.hand[0].id);
    assert!(staged.hand.is_empty());
    assert_eq!(staged.workspace.len(), 1);

    let reset = engine.reset();
    assert_eq!(reset.deck_count, 0);
    assert!(reset.hand.is_empty());
    assert!(reset.workspace.is_empty());
    assert_eq!(reset.resources, Resources::default());
}

#[test]
fn resources_are_reset_but_never_derived_from_cards() {
    let mut engine = CardEngine::new();
    let mut deck = cards(2);
    deck[0].time = 3;
    deck[1].reputation = -2;

    engine.load_deck(&deck);
    engine.draw_card().expect("deck has cards");
    engine.draw_card().expect("deck has cards");

    // Card deltas are descriptive only; the ledger stays at its starting
    // values until the next reset or load.
    assert_eq!(engine.snapshot().resources, Resources::default());
}
