//! The card/deck simulation and its guard layer.

pub mod engine;
pub mod entities;
pub mod errors;
pub mod manager;

pub use engine::CardEngine;
pub use entities::{Card, CardId, Resources, STARTING_RESOURCE, Snapshot};
pub use errors::{GameError, GameResult};
pub use manager::GameManager;
