//! Room models and current-room reconciliation.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{RoomError, RoomResult};
pub use manager::{RoomManager, reconcile};
pub use models::{Room, RoomStatus, RoomVisibility};
