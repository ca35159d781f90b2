//! Integration tests for the retention purge background task.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use docfill::session::retention::spawn_retention_task;
use docfill::session::SessionRegistry;
use tokio_util::sync::CancellationToken;

use super::test_helpers::sample_session;

async fn wait_until_empty(registry: &SessionRegistry) -> bool {
    for _ in 0..50 {
        if registry.is_empty() {
            return true;
        }
        tokio::time::sleep(StdDuration::from_millis(20)).await;
    }
    registry.is_empty()
}

#[tokio::test]
async fn idle_sessions_are_evicted_on_the_first_tick() {
    let registry = Arc::new(SessionRegistry::new(8));
    let handle = registry.create(sample_session()).expect("create");
    handle.lock().await.last_activity = Utc::now() - Duration::minutes(500);

    let ct = CancellationToken::new();
    let task = spawn_retention_task(Arc::clone(&registry), 240, ct.clone());

    assert!(wait_until_empty(&registry).await, "stale session not evicted");

    ct.cancel();
    task.await.expect("join");
}

#[tokio::test]
async fn fresh_sessions_survive_the_purge() {
    let registry = Arc::new(SessionRegistry::new(8));
    registry.create(sample_session()).expect("create");

    let ct = CancellationToken::new();
    let task = spawn_retention_task(Arc::clone(&registry), 240, ct.clone());

    // Let at least one tick run.
    tokio::time::sleep(StdDuration::from_millis(150)).await;
    assert_eq!(registry.len(), 1);

    ct.cancel();
    task.await.expect("join");
}

#[tokio::test]
async fn cancellation_stops_the_task() {
    let registry = Arc::new(SessionRegistry::new(8));
    let ct = CancellationToken::new();
    let task = spawn_retention_task(Arc::clone(&registry), 240, ct.clone());

    ct.cancel();
    tokio::time::timeout(StdDuration::from_secs(2), task)
        .await
        .expect("task should stop promptly")
        .expect("join");
}
