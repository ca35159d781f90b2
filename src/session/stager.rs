//! Staging area for assistant-proposed values awaiting a user decision.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::models::Suggestion;
use crate::session::store::PlaceholderStore;
use crate::{AppError, Result};

/// Holds at most one pending suggestion per placeholder key.
///
/// The stager never touches the store: `accept` hands the proposed value
/// back to the caller, which is responsible for committing it. After
/// `accept` or `reject` no trace of the suggestion remains.
#[derive(Debug, Default)]
pub struct SuggestionStager {
    pending: HashMap<String, Suggestion>,
}

impl SuggestionStager {
    /// Stage a suggestion, superseding any prior pending one for its key.
    ///
    /// The store is borrowed for key validation only.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownKey` if the referenced placeholder does
    /// not exist.
    pub fn stage(&mut self, store: &PlaceholderStore, suggestion: Suggestion) -> Result<()> {
        if !store.contains_key(&suggestion.key) {
            return Err(AppError::UnknownKey(suggestion.key));
        }
        debug!(key = %suggestion.key, "suggestion staged");
        self.pending.insert(suggestion.key.clone(), suggestion);
        Ok(())
    }

    /// Snapshot of outstanding proposals as key → proposed value.
    #[must_use]
    pub fn pending(&self) -> BTreeMap<String, String> {
        self.pending
            .iter()
            .map(|(k, s)| (k.clone(), s.proposed_value.clone()))
            .collect()
    }

    /// Whether any suggestion is pending for the key.
    #[must_use]
    pub fn has_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    /// Remove the pending suggestion for `key` and return its value for the
    /// caller to commit.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NoSuchSuggestion` if nothing is pending for the
    /// key (never staged, already resolved, or superseded away).
    pub fn accept(&mut self, key: &str) -> Result<String> {
        self.pending
            .remove(key)
            .map(|s| s.proposed_value)
            .ok_or_else(|| AppError::NoSuchSuggestion(key.to_owned()))
    }

    /// Discard the pending suggestion for `key`; no other state changes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NoSuchSuggestion` under the same condition as
    /// [`Self::accept`].
    pub fn reject(&mut self, key: &str) -> Result<()> {
        self.pending
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| AppError::NoSuchSuggestion(key.to_owned()))
    }

    /// Silently drop any pending suggestion for `key`.
    ///
    /// Used when a direct or bulk fill provides ground truth that
    /// supersedes an unconfirmed proposal.
    pub fn invalidate(&mut self, key: &str) {
        if self.pending.remove(key).is_some() {
            debug!(key, "pending suggestion invalidated by direct fill");
        }
    }
}
