//! Authoritative per-session map of placeholder key → fulfillment state.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Placeholder, PlaceholderKind};
use crate::{AppError, Result};

/// Insertion-ordered placeholder store seeded once at session creation.
///
/// Iteration order is detection order and is stable across calls. Sessions
/// hold at most a few dozen placeholders, so lookups scan the backing vec.
#[derive(Debug, Default)]
pub struct PlaceholderStore {
    slots: Vec<Placeholder>,
}

impl PlaceholderStore {
    /// Seed a store from the parser's ordered `(key, kind)` pairs.
    ///
    /// Duplicate keys are collapsed to their first occurrence.
    #[must_use]
    pub fn seed(pairs: impl IntoIterator<Item = (String, PlaceholderKind)>) -> Self {
        let mut store = Self::default();
        for (key, kind) in pairs {
            if store.get(&key).is_none() {
                store.slots.push(Placeholder::new(key, kind));
            }
        }
        store
    }

    /// All placeholders in detection order.
    #[must_use]
    pub fn list(&self) -> &[Placeholder] {
        &self.slots
    }

    /// Look up a placeholder by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Placeholder> {
        self.slots.iter().find(|p| p.key == key)
    }

    /// Whether a key exists in the store.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Commit a value into a placeholder. Idempotent: committing the same
    /// value twice leaves identical state.
    ///
    /// A value only ever transitions empty → non-empty → a different
    /// non-empty value, so an empty value is rejected rather than clearing
    /// a filled slot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownKey` if the key is absent and
    /// `AppError::Parse` for an empty value. Validation happens before any
    /// mutation.
    pub fn commit(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::Parse(format!(
                "empty value for placeholder key: {key}"
            )));
        }
        let slot = self
            .slots
            .iter_mut()
            .find(|p| p.key == key)
            .ok_or_else(|| AppError::UnknownKey(key.to_owned()))?;
        slot.value = Some(value);
        debug!(key, "placeholder committed");
        Ok(())
    }

    /// Apply `commit` for every pair in the mapping, best-effort.
    ///
    /// Keys not present in the store are skipped, never created, as are
    /// empty values; a partial edit set is not blocked by one stale key.
    /// Returns the keys that were actually applied.
    pub fn commit_bulk<'a>(
        &mut self,
        mapping: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Vec<String> {
        let mut applied = Vec::new();
        for (key, value) in mapping {
            if self.commit(key, value).is_ok() {
                applied.push(key.to_owned());
            }
        }
        applied
    }

    /// True iff the store is non-empty and every placeholder is filled.
    #[must_use]
    pub fn all_filled(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Placeholder::is_filled)
    }

    /// Mapping of key → committed value for every filled placeholder.
    ///
    /// Consumed by the renderer and exporter.
    #[must_use]
    pub fn filled_mapping(&self) -> BTreeMap<String, String> {
        self.slots
            .iter()
            .filter(|p| p.is_filled())
            .filter_map(|p| p.value.clone().map(|v| (p.key.clone(), v)))
            .collect()
    }
}
