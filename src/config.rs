//! Client configuration.

use std::time::Duration;

use crate::admin::{DEFAULT_DEBOUNCE, DEFAULT_IDLE_TIMEOUT};

/// Default server address for local development.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Tunables for the client engine.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the game server API.
    pub api_base: String,

    /// Delay between the last admin token edit and its verification.
    pub admin_debounce: Duration,

    /// Inactivity window after which the admin token is cleared.
    pub admin_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            admin_debounce: DEFAULT_DEBOUNCE,
            admin_idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from the environment, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: std::env::var("CARDROOM_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            admin_debounce: std::env::var("CARDROOM_ADMIN_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.admin_debounce),
            admin_idle_timeout: std::env::var("CARDROOM_ADMIN_IDLE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.admin_idle_timeout),
        }
    }
}
