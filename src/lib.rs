//! # Cardroom Client
//!
//! A client-side state and session engine for a multiplayer card game.
//!
//! The engine authenticates a player, tracks which game room the player has
//! joined, runs a local simulation of a card deck (draw pile, hand,
//! workspace, and a five-resource ledger) from server-supplied card data,
//! and manages an administrator bearer token with debounced remote
//! verification and idle expiry. Rendering is out of scope: surfaces
//! subscribe to store events and call into the managers.
//!
//! ## Core Modules
//!
//! - [`store`]: the centralized reactive state store
//! - [`game`]: the deck/hand/workspace simulation and its guard layer
//! - [`rooms`]: room listings and current-room reconciliation
//! - [`admin`]: admin token validation, debounce, and idle expiry
//! - [`session`]: session persistence and the logout cascade
//! - [`net`]: the HTTP client for the game server
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cardroom_client::{CardroomClient, ClientConfig, storage::MemoryStorage};
//!
//! let client = CardroomClient::new(ClientConfig::default(), Arc::new(MemoryStorage::new()));
//! client.restore();
//! assert!(client.store.token().is_none());
//! ```

/// Admin token validation and idle expiry.
pub mod admin;
/// Fully wired client engine.
pub mod client;
/// Client configuration.
pub mod config;
/// The card/deck simulation and its guard layer.
pub mod game;
/// Networking components for talking to the game server.
pub mod net;
/// Room models and current-room reconciliation.
pub mod rooms;
/// Session persistence, restoration, and the logout cascade.
pub mod session;
/// Key-value persistence seam.
pub mod storage;
/// The centralized reactive state store.
pub mod store;
/// Field validation with stable error codes.
pub mod validate;

pub use admin::{AdminError, AdminTokenStatus, AdminTokenValidator, TokenPhase, TokenVerifier};
pub use client::CardroomClient;
pub use config::ClientConfig;
pub use game::{Card, CardEngine, CardId, GameError, GameManager, Resources, Snapshot};
pub use net::{ApiClient, ApiError};
pub use rooms::{Room, RoomError, RoomManager, RoomStatus, RoomVisibility};
pub use session::{Session, SessionError, SessionManager, User};
pub use store::{EventKind, Store, StoreEvent};
pub use validate::ValidationError;
