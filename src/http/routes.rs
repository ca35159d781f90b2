//! Route handlers mapping 1:1 onto session coordinator operations.
//!
//! Reads are pure snapshots; writes return the new snapshot so clients can
//! distinguish "nothing changed, retry" (an error status) from "changed,
//! see new snapshot".

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Message;
use crate::session::{ChatOutcome, PlaceholderView, Session, SessionSnapshot};
use crate::template::parse_template;
use crate::{AppError, Result};

use super::AppState;

/// Query parameter carrying the session identifier for snapshot reads.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    /// Opaque session identifier.
    pub session_id: String,
}

/// Upload request: the template document as text.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Original filename, echoed on download.
    pub filename: String,
    /// Template text to scan for placeholders.
    pub content: String,
}

/// Seed row returned by upload: key plus kind for input hinting.
#[derive(Debug, Serialize)]
pub struct PlaceholderSeed {
    /// Placeholder key.
    pub key: String,
    /// Input-hinting classification.
    #[serde(rename = "type")]
    pub kind: crate::models::PlaceholderKind,
}

/// Upload response: the new session and its detected placeholders.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Identifier for all subsequent operations.
    pub session_id: String,
    /// Detected placeholders in reading order.
    pub placeholders: Vec<PlaceholderSeed>,
}

/// Direct fill request.
#[derive(Debug, Deserialize)]
pub struct FillRequest {
    /// Session to mutate.
    pub session_id: String,
    /// Placeholder key.
    pub key: String,
    /// Value to commit.
    pub value: String,
}

/// Bulk fill request.
#[derive(Debug, Deserialize)]
pub struct FillBulkRequest {
    /// Session to mutate.
    pub session_id: String,
    /// Key → value pairs; unknown keys are skipped.
    pub mapping: BTreeMap<String, String>,
}

/// Chat turn request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Session to converse in.
    pub session_id: String,
    /// User message text.
    pub message: String,
}

/// Accept/reject request, keyed by placeholder key alone.
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    /// Session to mutate.
    pub session_id: String,
    /// Placeholder key whose pending suggestion is decided.
    pub key: String,
}

/// Mutation response: new snapshot plus the pending-suggestion view.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// Placeholder list and completion flag after the mutation.
    pub snapshot: SessionSnapshot,
    /// Outstanding suggestions after the mutation.
    pub suggestions: BTreeMap<String, String>,
}

/// Bulk fill response: applied keys plus the new snapshot.
#[derive(Debug, Serialize)]
pub struct FillBulkResponse {
    /// Keys that were actually committed.
    pub applied: Vec<String>,
    /// Placeholder list and completion flag after the mutation.
    pub snapshot: SessionSnapshot,
    /// Outstanding suggestions after the mutation; bulk fills invalidate
    /// pending suggestions for every mapped key.
    pub suggestions: BTreeMap<String, String>,
}

fn mutation_response(session: &Session) -> MutationResponse {
    MutationResponse {
        snapshot: session.snapshot(),
        suggestions: session.pending_suggestions(),
    }
}

/// `POST /api/upload` — seed a new session from template text.
///
/// # Errors
///
/// Returns `AppError::Parse` for an empty upload and `AppError::Capacity`
/// when the registry is full.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<UploadResponse>> {
    if req.content.trim().is_empty() {
        return Err(AppError::Parse("uploaded template is empty".into()));
    }

    let parsed = parse_template(&req.content);
    let seeds: Vec<PlaceholderSeed> = parsed
        .placeholders
        .iter()
        .map(|(key, kind)| PlaceholderSeed {
            key: key.clone(),
            kind: *kind,
        })
        .collect();

    let session = Session::new(req.filename, parsed);
    let session_id = session.id.clone();
    state.registry.create(session)?;

    info!(session_id = %session_id, placeholders = seeds.len(), "document uploaded");
    Ok(Json(UploadResponse {
        session_id,
        placeholders: seeds,
    }))
}

/// `GET /api/placeholders` — placeholder list snapshot.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown session identifiers.
pub async fn placeholders(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<Vec<PlaceholderView>>> {
    let handle = state.registry.get(&q.session_id)?;
    let session = handle.lock().await;
    Ok(Json(session.snapshot().placeholders))
}

/// `GET /api/messages` — conversation history snapshot.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown session identifiers.
pub async fn messages(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<Vec<Message>>> {
    let handle = state.registry.get(&q.session_id)?;
    let session = handle.lock().await;
    Ok(Json(session.messages().to_vec()))
}

/// `GET /api/render` — HTML preview with placeholder highlighting.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown session identifiers.
pub async fn render(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<serde_json::Value>> {
    let handle = state.registry.get(&q.session_id)?;
    let session = handle.lock().await;
    Ok(Json(serde_json::json!({ "html": session.render_preview() })))
}

/// `GET /api/download` — completed document as a text attachment.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown session identifiers.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SessionQuery>,
) -> Result<Response> {
    let handle = state.registry.get(&q.session_id)?;
    let session = handle.lock().await;
    let body = session.export();
    let disposition = format!(
        "attachment; filename=\"completed-{}\"",
        session.original_filename.replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// `POST /api/fill` — commit one value directly.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown sessions,
/// `AppError::UnknownKey` for keys absent from the session, and
/// `AppError::Parse` for an empty value.
pub async fn fill(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FillRequest>,
) -> Result<Json<MutationResponse>> {
    let handle = state.registry.get(&req.session_id)?;
    let mut session = handle.lock().await;
    session.fill_direct(&req.key, &req.value)?;
    Ok(Json(mutation_response(&session)))
}

/// `POST /api/fill-bulk` — best-effort bulk commit.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown sessions; unknown keys
/// in the mapping are skipped, not errors.
pub async fn fill_bulk(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FillBulkRequest>,
) -> Result<Json<FillBulkResponse>> {
    let handle = state.registry.get(&req.session_id)?;
    let mut session = handle.lock().await;
    let applied = session.fill_bulk(&req.mapping);
    Ok(Json(FillBulkResponse {
        applied,
        snapshot: session.snapshot(),
        suggestions: session.pending_suggestions(),
    }))
}

/// `POST /api/chat` — one conversational turn.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown sessions. An
/// unavailable assistant is not an error: the outcome is flagged degraded.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatOutcome>> {
    let handle = state.registry.get(&req.session_id)?;
    let mut session = handle.lock().await;
    let outcome = session
        .submit_chat(&req.message, state.assistant.as_ref())
        .await;
    Ok(Json(outcome))
}

/// `POST /api/apply-suggestion` — accept the pending suggestion for a key.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown sessions and
/// `AppError::NoSuchSuggestion` when nothing is pending for the key.
pub async fn apply_suggestion(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SuggestionRequest>,
) -> Result<Json<MutationResponse>> {
    let handle = state.registry.get(&req.session_id)?;
    let mut session = handle.lock().await;
    session.accept_suggestion(&req.key)?;
    Ok(Json(mutation_response(&session)))
}

/// `POST /api/reject-suggestion` — discard the pending suggestion for a key.
///
/// # Errors
///
/// Returns `AppError::SessionNotFound` for unknown sessions and
/// `AppError::NoSuchSuggestion` when nothing is pending for the key.
pub async fn reject_suggestion(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SuggestionRequest>,
) -> Result<Json<MutationResponse>> {
    let handle = state.registry.get(&req.session_id)?;
    let mut session = handle.lock().await;
    session.reject_suggestion(&req.key)?;
    Ok(Json(mutation_response(&session)))
}
