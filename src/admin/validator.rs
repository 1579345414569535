//! Debounced admin token verification with idle expiry.
//!
//! The admin token is a bearer credential separate from user login. Every
//! edit of the token input immediately invalidates any prior verification,
//! then a debounced request checks the new value against the server. A
//! verified token expires after a period without user activity.
//!
//! The raw value is persisted under [`keys::ADMIN_TOKEN`] so a reload can
//! seed the input and re-verify; clearing or expiring the token removes it.
//!
//! Timers run on the tokio clock, so tests drive them deterministically
//! with a paused runtime and `tokio::time::advance`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::errors::{AdminError, AdminResult};
use crate::net::{ApiClient, ApiResult};
use crate::storage::{Storage, keys};
use crate::store::Store;

/// Delay between the last token edit and the verification request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Inactivity window after which a present token is cleared.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// The validator's published state.
///
/// Invariant: `is_valid` is only ever true for the exact `value` it was
/// computed against. Any change to `value` forces it false until the new
/// value is re-verified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminTokenStatus {
    pub value: String,
    pub is_valid: bool,
    pub is_checking: bool,
}

impl AdminTokenStatus {
    /// The informal state-machine phase this status represents.
    pub fn phase(&self) -> TokenPhase {
        if self.value.is_empty() {
            TokenPhase::Idle
        } else if self.is_checking {
            TokenPhase::Checking
        } else if self.is_valid {
            TokenPhase::Valid
        } else {
            TokenPhase::Invalid
        }
    }
}

/// Phases of the token validation state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenPhase {
    Idle,
    Checking,
    Valid,
    Invalid,
}

/// The external verification endpoint, injected so tests can control
/// outcome and latency.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolve on HTTP 2xx, reject otherwise.
    async fn verify(&self, token: &str) -> ApiResult<()>;
}

#[async_trait]
impl TokenVerifier for ApiClient {
    async fn verify(&self, token: &str) -> ApiResult<()> {
        self.verify_admin_token(token).await
    }
}

#[derive(Default)]
struct ValidatorInner {
    status: AdminTokenStatus,
    /// Bumped on every input change and on expiry. A verification outcome
    /// whose generation no longer matches is discarded; in-flight requests
    /// are never aborted.
    generation: u64,
    /// HTTP status of the most recent verification rejection.
    last_rejection: Option<u16>,
    debounce_task: Option<JoinHandle<()>>,
    idle_task: Option<JoinHandle<()>>,
}

/// Debounces token input, verifies it remotely, and expires it on idle.
///
/// Methods that schedule work take `Arc<Self>` and must run inside a tokio
/// runtime.
pub struct AdminTokenValidator {
    store: Arc<Store>,
    verifier: Arc<dyn TokenVerifier>,
    storage: Arc<dyn Storage>,
    debounce: Duration,
    idle_timeout: Duration,
    inner: Mutex<ValidatorInner>,
}

impl AdminTokenValidator {
    pub fn new(
        store: Arc<Store>,
        verifier: Arc<dyn TokenVerifier>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self::with_timing(store, verifier, storage, DEFAULT_DEBOUNCE, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_timing(
        store: Arc<Store>,
        verifier: Arc<dyn TokenVerifier>,
        storage: Arc<dyn Storage>,
        debounce: Duration,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            store,
            verifier,
            storage,
            debounce,
            idle_timeout,
            inner: Mutex::new(ValidatorInner::default()),
        }
    }

    /// Seed the input from the persisted token, if any, kicking off a fresh
    /// debounced verification for it.
    pub fn restore(self: &Arc<Self>) {
        if let Some(saved) = self.storage.get(keys::ADMIN_TOKEN) {
            self.input_changed(&saved);
        }
    }

    /// Record a token edit.
    ///
    /// Synchronously and unconditionally invalidates any prior verification
    /// for the old value, cancels the pending debounce, and, for a
    /// non-empty value, schedules a fresh verification after the debounce
    /// interval.
    pub fn input_changed(self: &Arc<Self>, raw: &str) {
        let value = raw.trim().to_string();
        let status = {
            let mut inner = self.inner.lock();
            if let Some(task) = inner.debounce_task.take() {
                task.abort();
            }
            inner.generation += 1;
            let generation = inner.generation;
            inner.status = AdminTokenStatus {
                value: value.clone(),
                is_valid: false,
                is_checking: !value.is_empty(),
            };
            inner.last_rejection = None;
            if !value.is_empty() {
                let this = Arc::clone(self);
                let captured = value.clone();
                let deadline = tokio::time::Instant::now() + self.debounce;
                inner.debounce_task = Some(tokio::spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    // Hand verification to its own task so cancelling a
                    // pending debounce can never abort an in-flight
                    // request; late responses are discarded by generation.
                    tokio::spawn(Arc::clone(&this).run_verification(captured, generation));
                }));
            }
            inner.status.clone()
        };
        if value.is_empty() {
            self.storage.remove(keys::ADMIN_TOKEN);
        } else {
            self.storage.set(keys::ADMIN_TOKEN, &value);
        }
        self.restart_idle_timer();
        self.store.set_admin_token_status(status);
    }

    async fn run_verification(self: Arc<Self>, value: String, generation: u64) {
        let outcome = self.verifier.verify(&value).await;
        let status = {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                // Superseded by a newer edit; that cycle owns the flags now.
                return;
            }
            inner.status.is_checking = false;
            match outcome {
                Ok(()) => {
                    // A success only counts for the value it was requested
                    // for. The generation check above already implies this;
                    // the comparison keeps the invariant explicit.
                    if inner.status.value == value {
                        inner.status.is_valid = true;
                    }
                }
                Err(err) => {
                    inner.status.is_valid = false;
                    inner.last_rejection = err.status();
                    warn!("admin token verification failed: {err}");
                }
            }
            inner.status.clone()
        };
        if status.is_valid {
            self.restart_idle_timer();
        }
        self.store.set_admin_token_status(status);
    }

    /// Record user activity, restarting the idle countdown while a token is
    /// present.
    pub fn touch(self: &Arc<Self>) {
        self.restart_idle_timer();
    }

    /// Clear the token entirely, as if the input were emptied.
    pub fn clear(self: &Arc<Self>) {
        self.input_changed("");
    }

    fn restart_idle_timer(self: &Arc<Self>) {
        let mut inner = self.inner.lock();
        if let Some(task) = inner.idle_task.take() {
            task.abort();
        }
        if inner.status.value.is_empty() {
            return;
        }
        let this = Arc::clone(self);
        let deadline = tokio::time::Instant::now() + self.idle_timeout;
        inner.idle_task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            this.expire_idle();
        }));
    }

    fn expire_idle(&self) {
        let status = {
            let mut inner = self.inner.lock();
            if inner.status.value.is_empty() {
                return;
            }
            if let Some(task) = inner.debounce_task.take() {
                task.abort();
            }
            inner.generation += 1;
            inner.status = AdminTokenStatus::default();
            inner.last_rejection = None;
            inner.idle_task = None;
            inner.status.clone()
        };
        self.storage.remove(keys::ADMIN_TOKEN);
        warn!(
            "admin token cleared after {:?} of inactivity",
            self.idle_timeout
        );
        self.store.set_admin_token_status(status);
    }

    /// Current published state.
    pub fn status(&self) -> AdminTokenStatus {
        self.inner.lock().status.clone()
    }

    /// HTTP status of the most recent verification rejection, if any.
    pub fn last_rejection(&self) -> Option<u16> {
        self.inner.lock().last_rejection
    }

    /// The exact token string to send with an admin request.
    ///
    /// Only ever returns the value verification succeeded against, so the
    /// returned string is usable by construction.
    pub fn require_token(&self) -> AdminResult<String> {
        let inner = self.inner.lock();
        if inner.status.value.is_empty() {
            Err(AdminError::TokenRequired)
        } else if inner.status.is_valid {
            Ok(inner.status.value.clone())
        } else {
            Err(AdminError::TokenInvalid)
        }
    }
}

impl Drop for AdminTokenValidator {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if let Some(task) = inner.debounce_task.take() {
            task.abort();
        }
        if let Some(task) = inner.idle_task.take() {
            task.abort();
        }
    }
}
