//! Retention service for idle-session eviction.
//!
//! Runs as a background task purging sessions that have been idle beyond
//! the configured retention window.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::registry::SessionRegistry;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the retention purge background task.
///
/// The task ticks once a minute. On each tick it evicts every session
/// whose last activity is older than `retention_minutes`.
#[must_use]
pub fn spawn_retention_task(
    registry: Arc<SessionRegistry>,
    retention_minutes: u32,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let max_idle = chrono::Duration::minutes(i64::from(retention_minutes));
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("retention task shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let evicted = registry.purge_idle(max_idle);
                    if evicted > 0 {
                        info!(evicted, retention_minutes, "retention purge completed");
                    }
                }
            }
        }
    })
}
