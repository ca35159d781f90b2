//! Suggestion entity: an unconfirmed proposed value for a placeholder.

use serde::{Deserialize, Serialize};

/// A pending proposal produced by the assistant, keyed by placeholder key.
///
/// At most one pending suggestion exists per key; a newer proposal for the
/// same key silently supersedes an older unresolved one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Suggestion {
    /// Key of the placeholder this proposal targets.
    pub key: String,
    /// Proposed value awaiting the user's decision.
    pub proposed_value: String,
    /// Index into the conversation log of the turn that produced it.
    pub origin_message_index: usize,
}

impl Suggestion {
    /// Construct a pending suggestion.
    #[must_use]
    pub fn new(key: String, proposed_value: String, origin_message_index: usize) -> Self {
        Self {
            key,
            proposed_value,
            origin_message_index,
        }
    }
}
