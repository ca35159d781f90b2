//! Conversational assistant abstraction.
//!
//! The [`Assistant`] trait decouples the session core from the model
//! backend: given the conversation history and the pending placeholder
//! snapshot it produces a reply and a mapping of proposed values. The core
//! treats the mapping as untrusted and re-filters it against the
//! authoritative key set before staging.

pub mod extract;
pub mod groq;

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use crate::models::{Message, PlaceholderKind};
use crate::Result;

pub use groq::GroqAssistant;

/// Boxed future used to keep [`Assistant`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// View of one unfilled placeholder handed to the assistant.
#[derive(Debug, Clone)]
pub struct PendingPlaceholder {
    /// Placeholder key, e.g. `[Company Name]`.
    pub key: String,
    /// Input-hinting classification.
    pub kind: PlaceholderKind,
    /// Deterministic semantic hint for the key.
    pub hint: String,
}

/// Outcome of one assistant turn.
#[derive(Debug, Clone)]
pub struct AssistantTurn {
    /// Reply text shown to the user.
    pub reply: String,
    /// Proposed key → value pairs; weakly typed and unvalidated.
    pub suggestions: BTreeMap<String, String>,
}

/// External assistant collaborator invoked by the session coordinator.
pub trait Assistant: Send + Sync {
    /// Produce a reply and proposed values for the pending placeholders.
    ///
    /// `history` is the conversation so far, excluding `message` (the turn
    /// being processed). Implementations bound their own latency; the core
    /// awaits the call as a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AssistantUnavailable` when the backend cannot be
    /// reached; the coordinator degrades the turn instead of failing it.
    fn propose<'a>(
        &'a self,
        history: &'a [Message],
        pending: &'a [PendingPlaceholder],
        message: &'a str,
    ) -> BoxFuture<'a, Result<AssistantTurn>>;
}
