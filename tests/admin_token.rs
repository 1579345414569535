//! Timer-driven admin token scenarios under a paused clock.

use async_trait::async_trait;
use cardroom_client::admin::{AdminTokenStatus, AdminTokenValidator, TokenVerifier};
use cardroom_client::net::{ApiError, ApiResult};
use cardroom_client::storage::{MemoryStorage, Storage, keys};
use cardroom_client::store::{EventKind, Store, StoreEvent};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(300);
const IDLE: Duration = Duration::from_secs(60);

/// Verifier whose latency and outcome are scripted per call.
struct ScriptedVerifier {
    delay: Duration,
    outcomes: Mutex<Vec<Result<(), u16>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedVerifier {
    fn new(delay: Duration, outcomes: Vec<Result<(), u16>>) -> Arc<Self> {
        Arc::new(Self {
            delay,
            outcomes: Mutex::new(outcomes),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl TokenVerifier for ScriptedVerifier {
    async fn verify(&self, token: &str) -> ApiResult<()> {
        self.seen.lock().push(token.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let outcome = {
            let mut outcomes = self.outcomes.lock();
            if outcomes.is_empty() { Ok(()) } else { outcomes.remove(0) }
        };
        outcome.map_err(|status| ApiError::Status {
            status,
            body: String::new(),
        })
    }
}

fn validator(
    store: Arc<Store>,
    verifier: Arc<ScriptedVerifier>,
) -> Arc<AdminTokenValidator> {
    validator_with_storage(store, verifier, Arc::new(MemoryStorage::new()))
}

fn validator_with_storage(
    store: Arc<Store>,
    verifier: Arc<ScriptedVerifier>,
    storage: Arc<MemoryStorage>,
) -> Arc<AdminTokenValidator> {
    Arc::new(AdminTokenValidator::with_timing(
        store,
        verifier,
        storage as Arc<dyn Storage>,
        DEBOUNCE,
        IDLE,
    ))
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn late_success_for_an_old_value_is_discarded() {
    // The verification for "old" takes a full second; the user keeps typing
    // while it is in flight.
    let verifier = ScriptedVerifier::new(Duration::from_secs(1), vec![Ok(()), Ok(())]);
    let validator = validator(Arc::new(Store::new()), Arc::clone(&verifier));

    validator.input_changed("old");
    tokio::time::advance(DEBOUNCE).await;
    settle().await;
    assert_eq!(verifier.seen(), vec!["old"]);

    // Edit mid-flight. The old request keeps running; its success must not
    // mark the new value valid.
    tokio::time::advance(Duration::from_millis(100)).await;
    validator.input_changed("new");
    settle().await;

    // Let the old verification complete (total in-flight time > 1s) while
    // the new one is still pending.
    tokio::time::advance(Duration::from_millis(950)).await;
    settle().await;

    let status = validator.status();
    assert_eq!(status.value, "new");
    assert!(!status.is_valid, "stale success must not validate the new value");

    // The new value's own verification eventually lands.
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    let status = validator.status();
    assert_eq!(status.value, "new");
    assert!(status.is_valid);
    assert_eq!(verifier.seen(), vec!["old", "new"]);
}

#[tokio::test(start_paused = true)]
async fn idle_expiry_clears_the_token_entirely() {
    let verifier = ScriptedVerifier::new(Duration::ZERO, vec![Ok(())]);
    let store = Arc::new(Store::new());
    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed_in_handler = Arc::clone(&observed);
    store.on(EventKind::AdminTokenChanged, move |event| {
        if let StoreEvent::AdminTokenChanged(status) = event {
            observed_in_handler.lock().push(status.clone());
        }
    });

    let storage = Arc::new(MemoryStorage::new());
    let validator = validator_with_storage(Arc::clone(&store), verifier, Arc::clone(&storage));
    validator.input_changed("secret");
    tokio::time::advance(DEBOUNCE).await;
    settle().await;
    assert!(validator.status().is_valid);
    assert_eq!(storage.get(keys::ADMIN_TOKEN), Some("secret".to_string()));

    tokio::time::advance(IDLE).await;
    settle().await;

    let status = validator.status();
    assert_eq!(status, AdminTokenStatus::default());
    assert_eq!(storage.get(keys::ADMIN_TOKEN), None, "expiry must forget the value");

    let last = observed.lock().last().cloned().expect("expiry must be published");
    assert_eq!(last, AdminTokenStatus::default());
}

#[tokio::test(start_paused = true)]
async fn a_persisted_token_survives_a_reload_and_is_rechecked() {
    let storage = Arc::new(MemoryStorage::new());
    let verifier = ScriptedVerifier::new(Duration::ZERO, vec![Ok(())]);
    let validator = validator_with_storage(
        Arc::new(Store::new()),
        Arc::clone(&verifier),
        Arc::clone(&storage),
    );
    validator.input_changed("secret");
    tokio::time::advance(DEBOUNCE).await;
    settle().await;
    drop(validator);

    // A fresh validator over the same storage, as after a page reload. The
    // saved value comes back unverified and goes through the normal check.
    let verifier = ScriptedVerifier::new(Duration::ZERO, vec![Ok(())]);
    let validator = validator_with_storage(
        Arc::new(Store::new()),
        Arc::clone(&verifier),
        Arc::clone(&storage),
    );
    validator.restore();
    assert_eq!(validator.status().value, "secret");
    assert!(!validator.status().is_valid);

    tokio::time::advance(DEBOUNCE).await;
    settle().await;
    assert_eq!(verifier.seen(), vec!["secret"]);
    assert!(validator.status().is_valid);
}

#[tokio::test(start_paused = true)]
async fn activity_restarts_the_idle_countdown() {
    let verifier = ScriptedVerifier::new(Duration::ZERO, vec![Ok(())]);
    let validator = validator(Arc::new(Store::new()), verifier);

    validator.input_changed("secret");
    tokio::time::advance(DEBOUNCE).await;
    settle().await;
    assert!(validator.status().is_valid);

    // Repeated activity just before the deadline keeps the token alive.
    for _ in 0..3 {
        tokio::time::advance(IDLE - Duration::from_secs(1)).await;
        settle().await;
        validator.touch();
    }
    assert!(validator.status().is_valid, "touches must keep the token alive");

    // No further activity: the token expires.
    tokio::time::advance(IDLE).await;
    settle().await;
    assert_eq!(validator.status(), AdminTokenStatus::default());
}

#[tokio::test(start_paused = true)]
async fn clearing_the_token_cancels_the_idle_timer() {
    let verifier = ScriptedVerifier::new(Duration::ZERO, vec![Ok(()), Ok(())]);
    let validator = validator(Arc::new(Store::new()), Arc::clone(&verifier));

    validator.input_changed("secret");
    tokio::time::advance(DEBOUNCE).await;
    settle().await;
    validator.clear();

    // Entering a new token right away must not inherit the old countdown.
    validator.input_changed("second");
    tokio::time::advance(DEBOUNCE).await;
    settle().await;
    assert!(validator.status().is_valid);

    tokio::time::advance(IDLE - Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(validator.status().value, "second");
}

#[tokio::test(start_paused = true)]
async fn rejection_keeps_the_value_but_not_validity() {
    let verifier = ScriptedVerifier::new(Duration::ZERO, vec![Err(403)]);
    let validator = validator(Arc::new(Store::new()), verifier);

    validator.input_changed("wrong");
    tokio::time::advance(DEBOUNCE).await;
    settle().await;

    let status = validator.status();
    assert_eq!(status.value, "wrong");
    assert!(!status.is_valid);
    assert!(!status.is_checking);
    assert_eq!(validator.last_rejection(), Some(403));
}
