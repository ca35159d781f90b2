//! Placeholder entity: a named slot in a template awaiting a value.

use serde::{Deserialize, Serialize};

/// Input-hinting classification for a placeholder.
///
/// Used only to shape assistant prompts and client input widgets; values are
/// never validated against the kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaceholderKind {
    /// Free-form text.
    Text,
    /// Calendar date.
    Date,
    /// Dollar amount.
    Money,
    /// Legal company name.
    Company,
    /// Personal name or title.
    Person,
}

/// A named slot in a template document awaiting a value.
///
/// The key is unique within a session and never changes after creation. The
/// value only ever transitions empty → non-empty → (possibly) a different
/// non-empty value; the system never clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Placeholder {
    /// Unique key within the session, e.g. `[Company Name]`.
    pub key: String,
    /// Input-hinting classification.
    #[serde(rename = "type")]
    pub kind: PlaceholderKind,
    /// Committed value, present once filled.
    pub value: Option<String>,
}

impl Placeholder {
    /// Construct an unfilled placeholder.
    #[must_use]
    pub fn new(key: String, kind: PlaceholderKind) -> Self {
        Self {
            key,
            kind,
            value: None,
        }
    }

    /// Whether the placeholder holds a non-empty value.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_empty())
    }
}
