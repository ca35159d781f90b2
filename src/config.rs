//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Nested assistant configuration for the chat-completions backend.
///
/// The API key is loaded at runtime from the environment, never from the
/// TOML config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AssistantConfig {
    /// Base URL of the chat-completions API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model identifier requested for extraction turns.
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_seconds")]
    pub request_seconds: u64,
    /// API key (populated at runtime from `DOCFILL_ASSISTANT_API_KEY`).
    #[serde(skip)]
    pub api_key: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            request_seconds: default_request_seconds(),
            api_key: String::new(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.groq.com/openai/v1".into()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}

fn default_request_seconds() -> u64 {
    30
}

fn default_http_port() -> u16 {
    8000
}

fn default_retention_minutes() -> u32 {
    240
}

fn default_max_sessions() -> u32 {
    64
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// HTTP port for the API server.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Minutes a session may sit idle before the retention purge evicts it.
    #[serde(default = "default_retention_minutes")]
    pub retention_minutes: u32,
    /// Maximum number of live sessions held in the registry.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u32,
    /// Assistant backend settings.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the assistant API key from `DOCFILL_ASSISTANT_API_KEY`.
    ///
    /// A missing key is not an error: the server then runs without a model
    /// backend and chat turns fall back to the deterministic extractors.
    pub fn load_credentials(&mut self) {
        match env::var("DOCFILL_ASSISTANT_API_KEY") {
            Ok(key) if !key.is_empty() => self.assistant.api_key = key,
            _ => {
                warn!("DOCFILL_ASSISTANT_API_KEY not set; assistant runs in fallback-only mode");
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_sessions == 0 {
            return Err(AppError::Config(
                "max_sessions must be greater than zero".into(),
            ));
        }
        if self.retention_minutes == 0 {
            return Err(AppError::Config(
                "retention_minutes must be greater than zero".into(),
            ));
        }
        if self.assistant.api_base.is_empty() {
            return Err(AppError::Config("assistant.api_base must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            retention_minutes: default_retention_minutes(),
            max_sessions: default_max_sessions(),
            assistant: AssistantConfig::default(),
        }
    }
}
