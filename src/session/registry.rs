//! Process-wide session registry.
//!
//! Maps session identifiers to session aggregates. Sessions are created
//! explicitly on upload and evicted explicitly by the retention purge —
//! never created implicitly on first access. Each session sits behind its
//! own async mutex, the single critical section serializing all mutating
//! operations on it; the registry lock only guards the map and is never
//! held while a session lock is taken.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::info;

use crate::{AppError, Result};

use super::coordinator::Session;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Registry of live sessions keyed by identifier.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: StdMutex<HashMap<String, SessionHandle>>,
    max_sessions: usize,
}

impl SessionRegistry {
    /// Create an empty registry bounded at `max_sessions` live sessions.
    #[must_use]
    pub fn new(max_sessions: u32) -> Self {
        Self {
            sessions: StdMutex::new(HashMap::new()),
            max_sessions: usize::try_from(max_sessions).unwrap_or(usize::MAX),
        }
    }

    fn map(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a freshly created session and return its handle.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Capacity` when the registry is full; the caller
    /// may retry after the retention purge frees slots.
    pub fn create(&self, session: Session) -> Result<SessionHandle> {
        let mut map = self.map();
        if map.len() >= self.max_sessions {
            return Err(AppError::Capacity(format!(
                "registry holds {} sessions (max {})",
                map.len(),
                self.max_sessions
            )));
        }
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        map.insert(id.clone(), Arc::clone(&handle));
        info!(session_id = %id, live = map.len(), "session created");
        Ok(handle)
    }

    /// Look up a session by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SessionNotFound` for unknown or evicted
    /// identifiers; other sessions are unaffected.
    pub fn get(&self, id: &str) -> Result<SessionHandle> {
        self.map()
            .get(id)
            .map(Arc::clone)
            .ok_or_else(|| AppError::SessionNotFound(id.to_owned()))
    }

    /// Remove a session explicitly. Returns whether it existed.
    #[must_use]
    pub fn remove(&self, id: &str) -> bool {
        let existed = self.map().remove(id).is_some();
        if existed {
            info!(session_id = %id, "session removed");
        }
        existed
    }

    /// Evict sessions idle longer than `max_idle`. Returns the eviction
    /// count.
    ///
    /// Sessions whose mutex is currently held are mid-operation and are
    /// skipped; they will be re-examined on the next purge tick.
    #[must_use]
    pub fn purge_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let candidates: Vec<(String, SessionHandle)> = self
            .map()
            .iter()
            .map(|(id, handle)| (id.clone(), Arc::clone(handle)))
            .collect();

        let mut expired = Vec::new();
        for (id, handle) in candidates {
            if let Ok(session) = handle.try_lock() {
                if session.last_activity < cutoff {
                    expired.push(id);
                }
            }
        }

        let mut map = self.map();
        let mut evicted = 0;
        for id in expired {
            if map.remove(&id).is_some() {
                info!(session_id = %id, "idle session evicted");
                evicted += 1;
            }
        }
        evicted
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    /// Whether the registry holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}
