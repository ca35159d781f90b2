//! Domain entities owned by a session.

pub mod message;
pub mod placeholder;
pub mod suggestion;

pub use message::{Message, Role};
pub use placeholder::{Placeholder, PlaceholderKind};
pub use suggestion::Suggestion;
