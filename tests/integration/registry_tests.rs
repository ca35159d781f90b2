//! Integration tests for the session registry: lifecycle, capacity, and
//! idle-session purging.

use chrono::{Duration, Utc};
use docfill::session::SessionRegistry;
use docfill::AppError;

use super::test_helpers::sample_session;

#[tokio::test]
async fn create_then_get_returns_the_same_session() {
    let registry = SessionRegistry::new(8);
    let handle = registry.create(sample_session()).expect("create");
    let id = handle.lock().await.id.clone();

    let fetched = registry.get(&id).expect("get");
    assert_eq!(fetched.lock().await.id, id);
    assert_eq!(registry.len(), 1);
}

#[test]
fn unknown_id_is_session_not_found() {
    let registry = SessionRegistry::new(8);
    let err = registry.get("no-such-id").expect_err("missing");
    assert!(matches!(err, AppError::SessionNotFound(_)));
}

#[tokio::test]
async fn remove_evicts_and_later_lookups_fail() {
    let registry = SessionRegistry::new(8);
    let handle = registry.create(sample_session()).expect("create");
    let id = handle.lock().await.id.clone();

    assert!(registry.remove(&id));
    assert!(!registry.remove(&id));
    assert!(matches!(
        registry.get(&id),
        Err(AppError::SessionNotFound(_))
    ));
    assert!(registry.is_empty());
}

#[test]
fn capacity_limit_rejects_new_sessions() {
    let registry = SessionRegistry::new(1);
    registry.create(sample_session()).expect("first fits");

    let err = registry.create(sample_session()).expect_err("full");
    assert!(matches!(err, AppError::Capacity(_)));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn capacity_frees_up_after_removal() {
    let registry = SessionRegistry::new(1);
    let handle = registry.create(sample_session()).expect("create");
    let id = handle.lock().await.id.clone();
    assert!(registry.remove(&id));

    registry.create(sample_session()).expect("slot freed");
}

#[tokio::test]
async fn purge_evicts_only_stale_sessions() {
    let registry = SessionRegistry::new(8);
    let stale = registry.create(sample_session()).expect("create stale");
    registry.create(sample_session()).expect("create fresh");

    stale.lock().await.last_activity = Utc::now() - Duration::minutes(500);

    let evicted = registry.purge_idle(Duration::minutes(240));
    assert_eq!(evicted, 1);
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn purge_skips_sessions_that_are_mid_operation() {
    let registry = SessionRegistry::new(8);
    let handle = registry.create(sample_session()).expect("create");
    handle.lock().await.last_activity = Utc::now() - Duration::minutes(500);

    // Hold the session lock across the purge, as an in-flight request would.
    let guard = handle.lock().await;
    let evicted = registry.purge_idle(Duration::minutes(240));
    drop(guard);

    assert_eq!(evicted, 0);
    assert_eq!(registry.len(), 1);

    // Next purge catches it once the lock is released.
    assert_eq!(registry.purge_idle(Duration::minutes(240)), 1);
}

#[tokio::test]
async fn activity_resets_the_idle_clock() {
    let registry = SessionRegistry::new(8);
    let handle = registry.create(sample_session()).expect("create");
    handle.lock().await.last_activity = Utc::now() - Duration::minutes(500);

    handle
        .lock()
        .await
        .fill_direct("[Company Name]", "LEXSY, INC.")
        .expect("fill");

    assert_eq!(registry.purge_idle(Duration::minutes(240)), 0);
    assert_eq!(registry.len(), 1);
}
