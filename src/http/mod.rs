//! HTTP transport: axum router, shared state, and error mapping.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::assistant::Assistant;
use crate::config::GlobalConfig;
use crate::session::SessionRegistry;
use crate::{AppError, Result};

/// Shared application state accessible by all route handlers.
pub struct AppState {
    /// Global configuration.
    pub config: Arc<GlobalConfig>,
    /// Process-wide session registry.
    pub registry: Arc<SessionRegistry>,
    /// Assistant collaborator invoked by chat turns.
    pub assistant: Arc<dyn Assistant>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::SessionNotFound(_) | Self::UnknownKey(_) | Self::NoSuchSuggestion(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Parse(_) | Self::Config(_) => StatusCode::BAD_REQUEST,
            Self::Capacity(_) | Self::AssistantUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Handler for `GET /health` — returns 200 OK with a plain-text body.
async fn health() -> &'static str {
    "ok"
}

/// Build the API router over shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/upload", post(routes::upload))
        .route("/api/placeholders", get(routes::placeholders))
        .route("/api/messages", get(routes::messages))
        .route("/api/render", get(routes::render))
        .route("/api/download", get(routes::download))
        .route("/api/fill", post(routes::fill))
        .route("/api/fill-bulk", post(routes::fill_bulk))
        .route("/api/chat", post(routes::chat))
        .route("/api/apply-suggestion", post(routes::apply_suggestion))
        .route("/api/reject-suggestion", post(routes::reject_suggestion))
        .with_state(state)
}

/// Serve the API on `config.http_port` until the token is cancelled.
///
/// # Errors
///
/// Returns `AppError::Http` if the listener fails to bind or the server
/// errors while running.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let port = state.config.http_port;
    let bind = SocketAddr::from(([127, 0, 0, 1], port));

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Http(format!("failed to bind on {bind}: {err}")))?;

    info!(%bind, "starting HTTP API");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            ct.cancelled().await;
        })
        .await
        .map_err(|err| AppError::Http(format!("server error: {err}")))?;

    info!("HTTP API shut down");
    Ok(())
}
