//! Session aggregate: the coordinator callers interact with.
//!
//! Owns the placeholder store, the suggestion stager, and the conversation
//! log for one uploaded document, and sequences every mutating operation so
//! cross-cutting rules hold: direct fills invalidate pending suggestions,
//! assistant output is filtered against the authoritative key set, and a
//! chat turn commits atomically or not at all.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::assistant::{Assistant, PendingPlaceholder};
use crate::models::{Message, PlaceholderKind, Suggestion};
use crate::template::hints::generate_hint;
use crate::template::{render, ParsedTemplate};
use crate::Result;

use super::log::ConversationLog;
use super::stager::SuggestionStager;
use super::store::PlaceholderStore;

/// Read-model row for one placeholder, for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlaceholderView {
    /// Placeholder key.
    pub key: String,
    /// Input-hinting classification.
    #[serde(rename = "type")]
    pub kind: PlaceholderKind,
    /// Committed value, if any.
    pub value: Option<String>,
    /// Whether a non-empty value is committed.
    pub is_filled: bool,
}

/// Full placeholder list plus completion flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionSnapshot {
    /// Placeholders in detection order.
    pub placeholders: Vec<PlaceholderView>,
    /// True iff every placeholder is filled.
    pub all_filled: bool,
}

/// Result of one chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatOutcome {
    /// Reply text to show the user.
    pub reply: String,
    /// Pending-suggestion snapshot after the turn.
    pub suggestions: BTreeMap<String, String>,
    /// True when the assistant was unavailable and only the user message
    /// was recorded.
    pub degraded: bool,
}

/// One uploaded document's fulfillment state.
///
/// All mutating operations on a session run under its registry mutex, so
/// they are serialized; two sessions never share state.
#[derive(Debug)]
pub struct Session {
    /// Opaque session identifier.
    pub id: String,
    /// Name of the uploaded file, echoed back on export.
    pub original_filename: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutating operation, drives retention eviction.
    pub last_activity: DateTime<Utc>,
    template: String,
    store: PlaceholderStore,
    stager: SuggestionStager,
    log: ConversationLog,
}

impl Session {
    /// Create a session seeded from parser output.
    #[must_use]
    pub fn new(original_filename: String, parsed: ParsedTemplate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            original_filename,
            created_at: now,
            last_activity: now,
            template: parsed.template,
            store: PlaceholderStore::seed(parsed.placeholders),
            stager: SuggestionStager::default(),
            log: ConversationLog::default(),
        }
    }

    /// Authoritative placeholder store (read-only).
    #[must_use]
    pub fn store(&self) -> &PlaceholderStore {
        &self.store
    }

    /// Conversation history in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    /// Outstanding suggestion snapshot as key → proposed value.
    #[must_use]
    pub fn pending_suggestions(&self) -> BTreeMap<String, String> {
        self.stager.pending()
    }

    /// Rewritten template text this session was seeded from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    fn pending_view(&self) -> Vec<PendingPlaceholder> {
        self.store
            .list()
            .iter()
            .filter(|p| !p.is_filled())
            .map(|p| PendingPlaceholder {
                key: p.key.clone(),
                kind: p.kind,
                hint: generate_hint(&p.key),
            })
            .collect()
    }

    /// Process one chat turn.
    ///
    /// The assistant is invoked before any state mutation, so a turn
    /// abandoned mid-call leaves no partial message or suggestion behind.
    /// On success the user message, the assistant reply, and the staged
    /// suggestions commit together; proposed keys that do not exist in the
    /// store are silently dropped (assistant output is untrusted). When the
    /// assistant is unavailable only the user message is recorded and the
    /// outcome is flagged degraded.
    pub async fn submit_chat(&mut self, text: &str, assistant: &dyn Assistant) -> ChatOutcome {
        let span = info_span!("submit_chat", session_id = %self.id);
        let _guard = span.enter();

        // Short-circuit only on genuine completion: a session seeded with
        // zero placeholders is never "all filled" and still gets a real
        // assistant turn.
        if self.store.all_filled() {
            self.touch();
            self.log.append(Message::user(text));
            let reply = "All placeholders are already filled \u{1f389}";
            self.log.append(Message::assistant(reply));
            return ChatOutcome {
                reply: reply.to_owned(),
                suggestions: self.stager.pending(),
                degraded: false,
            };
        }

        let pending = self.pending_view();
        match assistant.propose(self.log.messages(), &pending, text).await {
            Ok(turn) => {
                self.touch();
                self.log.append(Message::user(text));
                let origin = self.log.append(Message::assistant(turn.reply.clone()));
                let mut staged = 0usize;
                for (key, value) in turn.suggestions {
                    if !self.store.contains_key(&key) {
                        warn!(key, "assistant proposed unknown key; dropped");
                        continue;
                    }
                    if value.trim().is_empty() {
                        warn!(key, "assistant proposed empty value; dropped");
                        continue;
                    }
                    if self
                        .stager
                        .stage(&self.store, Suggestion::new(key, value, origin))
                        .is_ok()
                    {
                        staged += 1;
                    }
                }
                info!(staged, "chat turn committed");
                ChatOutcome {
                    reply: turn.reply,
                    suggestions: self.stager.pending(),
                    degraded: false,
                }
            }
            Err(err) => {
                warn!(%err, "assistant unavailable; recording user message only");
                self.touch();
                self.log.append(Message::user(text));
                ChatOutcome {
                    reply: "The assistant is temporarily unavailable; your message was saved. \
                            Please try again."
                        .to_owned(),
                    suggestions: self.stager.pending(),
                    degraded: true,
                }
            }
        }
    }

    /// Commit a value directly, bypassing staging.
    ///
    /// A direct fill is ground truth: it also removes any pending
    /// suggestion for the same key.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownKey` if the key is absent and
    /// `AppError::Parse` for an empty value; nothing is mutated in either
    /// case.
    pub fn fill_direct(&mut self, key: &str, value: &str) -> Result<()> {
        self.store.commit(key, value)?;
        self.stager.invalidate(key);
        self.touch();
        info!(session_id = %self.id, key, "placeholder filled directly");
        Ok(())
    }

    /// Best-effort bulk commit; unknown keys are skipped, never created.
    ///
    /// Pending suggestions for every key appearing in the mapping are
    /// removed. Returns the keys actually applied.
    pub fn fill_bulk(&mut self, mapping: &BTreeMap<String, String>) -> Vec<String> {
        let applied = self
            .store
            .commit_bulk(mapping.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        for key in mapping.keys() {
            self.stager.invalidate(key);
        }
        self.touch();
        info!(session_id = %self.id, applied = applied.len(), "bulk fill applied");
        applied
    }

    /// Accept the pending suggestion for `key` and commit its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NoSuchSuggestion` if nothing is pending for the
    /// key, or `AppError::UnknownKey` if the placeholder vanished (cannot
    /// happen for keys validated at staging time).
    pub fn accept_suggestion(&mut self, key: &str) -> Result<String> {
        let value = self.stager.accept(key)?;
        self.store.commit(key, value.as_str())?;
        self.touch();
        info!(session_id = %self.id, key, "suggestion accepted");
        Ok(value)
    }

    /// Discard the pending suggestion for `key`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NoSuchSuggestion` if nothing is pending.
    pub fn reject_suggestion(&mut self, key: &str) -> Result<()> {
        self.stager.reject(key)?;
        self.touch();
        info!(session_id = %self.id, key, "suggestion rejected");
        Ok(())
    }

    /// Full placeholder list plus completion flag for the presentation
    /// layer.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            placeholders: self
                .store
                .list()
                .iter()
                .map(|p| PlaceholderView {
                    key: p.key.clone(),
                    kind: p.kind,
                    value: p.value.clone(),
                    is_filled: p.is_filled(),
                })
                .collect(),
            all_filled: self.store.all_filled(),
        }
    }

    /// HTML preview with placeholder highlighting.
    #[must_use]
    pub fn render_preview(&self) -> String {
        render::render_preview(&self.template, &self.store)
    }

    /// Completed document text with committed values substituted.
    #[must_use]
    pub fn export(&self) -> String {
        render::export(&self.template, &self.store)
    }
}
