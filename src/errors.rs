//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Operation referenced a placeholder key not present in the session.
    UnknownKey(String),
    /// Accept/reject targeted a key with no pending suggestion.
    NoSuchSuggestion(String),
    /// Operation referenced an unknown or expired session identifier.
    SessionNotFound(String),
    /// The external assistant call failed or timed out.
    AssistantUnavailable(String),
    /// Session registry is at its configured capacity.
    Capacity(String),
    /// Template parsing failure.
    Parse(String),
    /// HTTP transport failure.
    Http(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::UnknownKey(key) => write!(f, "unknown placeholder key: {key}"),
            Self::NoSuchSuggestion(key) => write!(f, "no pending suggestion for key: {key}"),
            Self::SessionNotFound(id) => write!(f, "session not found: {id}"),
            Self::AssistantUnavailable(msg) => write!(f, "assistant unavailable: {msg}"),
            Self::Capacity(msg) => write!(f, "capacity: {msg}"),
            Self::Parse(msg) => write!(f, "parse: {msg}"),
            Self::Http(msg) => write!(f, "http: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::AssistantUnavailable(err.to_string())
    }
}
