//! Session persistence, restoration, and the logout cascade.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{SessionError, SessionResult};
pub use manager::SessionManager;
pub use models::{Session, User};
