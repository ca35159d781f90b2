//! Groq chat-completions backend for the [`Assistant`] trait.
//!
//! Sends a strict JSON-only extraction prompt listing the pending
//! placeholders with their kinds and hints, salvages the first JSON object
//! from the reply, filters it to pending keys, and polishes values by kind.
//! Transport failures fall back to the deterministic extractors before
//! surfacing `AssistantUnavailable`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::AssistantConfig;
use crate::models::Message;
use crate::{AppError, Result};

use super::{extract, Assistant, AssistantTurn, BoxFuture, PendingPlaceholder};

const SYSTEM_PROMPT: &str = "You are a placeholder extraction assistant for a document template.\n\
You must return ONLY a JSON object.\n\
You may ONLY include keys from the pending placeholder list provided.\n\
For each key, use the 'hint' to decide if the user message provides that value.\n\
If the user message does not clearly provide a value for a placeholder, return null for that key, or omit it.\n\
NEVER invent data. NEVER output extra keys. No explanations.\n\
Formatting:\n\
- COMPANY: UPPERCASE (add ', INC.' ONLY if explicitly stated)\n\
- PERSON: Proper Case (Jane Doe)\n\
- DATE: Month D, YYYY (honor 'this year', 'last year', 'current year')\n\
- MONEY: $X,XXX or $X,XXX,XXX (prefix with $)\n";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Assistant backed by a hosted chat-completions endpoint.
pub struct GroqAssistant {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl GroqAssistant {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_seconds))
            .build()
            .map_err(|err| AppError::Config(format!("assistant http client: {err}")))?;
        Ok(Self { client, config })
    }

    async fn call_model(
        &self,
        history: &[Message],
        pending: &[PendingPlaceholder],
        message: &str,
    ) -> Result<String> {
        let mut messages = vec![json!({"role": "system", "content": SYSTEM_PROMPT})];
        for m in history {
            let role = match m.role {
                crate::models::Role::User => "user",
                crate::models::Role::Assistant => "assistant",
            };
            messages.push(json!({"role": role, "content": m.content}));
        }
        messages.push(json!({"role": "user", "content": user_prompt(pending, message)}));

        let body = json!({
            "model": self.config.model,
            "temperature": 0.2,
            "max_tokens": 512,
            "messages": messages,
        });

        let url = format!("{}/chat/completions", self.config.api_base);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatCompletion = resp.json().await?;
        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    async fn propose_inner(
        &self,
        history: &[Message],
        pending: &[PendingPlaceholder],
        message: &str,
    ) -> Result<AssistantTurn> {
        let mut mapping = if self.config.api_key.is_empty() {
            BTreeMap::new()
        } else {
            match self.call_model(history, pending, message).await {
                Ok(raw) => clean_mapping(&extract_json_object(&raw), pending),
                Err(err) => {
                    warn!(%err, "model call failed; trying deterministic fallbacks");
                    let fallback = extract::apply_fallbacks(message, pending);
                    if fallback.is_empty() {
                        return Err(err);
                    }
                    fallback
                }
            }
        };

        if mapping.is_empty() {
            mapping = extract::apply_fallbacks(message, pending);
        }

        let reply = if mapping.is_empty() {
            "No valid placeholder values detected.".to_owned()
        } else {
            let rendered =
                serde_json::to_string_pretty(&mapping).unwrap_or_else(|_| format!("{mapping:?}"));
            format!("Suggested values: {rendered}")
        };

        debug!(suggestions = mapping.len(), "assistant turn complete");
        Ok(AssistantTurn {
            reply,
            suggestions: mapping,
        })
    }
}

impl Assistant for GroqAssistant {
    fn propose<'a>(
        &'a self,
        history: &'a [Message],
        pending: &'a [PendingPlaceholder],
        message: &'a str,
    ) -> BoxFuture<'a, Result<AssistantTurn>> {
        Box::pin(self.propose_inner(history, pending, message))
    }
}

fn user_prompt(pending: &[PendingPlaceholder], message: &str) -> String {
    let pending_list: Vec<Value> = pending
        .iter()
        .map(|p| {
            json!({
                "key": p.key,
                "type": p.kind,
                "hint": p.hint,
            })
        })
        .collect();
    let rendered = serde_json::to_string_pretty(&pending_list).unwrap_or_else(|_| "[]".into());
    format!(
        "Pending placeholders (key, type, hint):\n{rendered}\n\n\
         User message:\n{message}\n\n\
         Return ONLY a JSON mapping for the pending keys where the message clearly provides the value.\n\
         If the message doesn't provide a value for a pending key, omit that key or set it to null."
    )
}

/// Salvage a JSON object from model output.
///
/// Tries a strict parse first, then scans for the first balanced `{…}`
/// block. Returns an empty map when nothing parses.
fn extract_json_object(text: &str) -> serde_json::Map<String, Value> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return map;
    }
    if let Some(start) = text.find('{') {
        let mut depth = 0usize;
        for (offset, ch) in text[start..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let candidate = &text[start..=start + offset];
                        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(candidate) {
                            return map;
                        }
                        break;
                    }
                }
                _ => {}
            }
        }
    }
    serde_json::Map::new()
}

/// Keep only pending keys with non-null, non-empty values, then polish
/// each value by its placeholder kind.
fn clean_mapping(
    raw: &serde_json::Map<String, Value>,
    pending: &[PendingPlaceholder],
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (key, value) in raw {
        let Some(p) = pending.iter().find(|p| &p.key == key) else {
            continue;
        };
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s.trim().to_owned(),
            other => other.to_string(),
        };
        if text.is_empty() || text == "null" {
            continue;
        }
        out.insert(key.clone(), extract::post_format(p.kind, &text));
    }
    out
}
