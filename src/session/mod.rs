//! Per-session placeholder fulfillment state machine.
//!
//! A [`Session`](coordinator::Session) owns one [`PlaceholderStore`],
//! one [`SuggestionStager`], and one [`ConversationLog`]; the process-wide
//! [`SessionRegistry`] maps session identifiers to sessions and is the only
//! place sessions are created or evicted.

pub mod coordinator;
pub mod log;
pub mod registry;
pub mod retention;
pub mod stager;
pub mod store;

pub use coordinator::{ChatOutcome, PlaceholderView, Session, SessionSnapshot};
pub use log::ConversationLog;
pub use registry::SessionRegistry;
pub use stager::SuggestionStager;
pub use store::PlaceholderStore;
