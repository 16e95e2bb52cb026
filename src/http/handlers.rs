use super::state::AppState;
use crate::session::StartOutcome;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartRecordingRequest {
    /// Spoken language to recognize, e.g. "en-US"
    pub source_lang: Option<String>,

    /// Language to translate into, e.g. "fr"
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Service discovery
pub async fn welcome() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to the Real-Time Speech Translator API!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "start_recording": "/api/start_recording",
            "stop_recording": "/api/stop_recording",
            "get_translation": "/api/get_translation",
            "clear_history": "/api/clear_history"
        },
        "instructions": "Make POST requests to start and stop recording, and GET requests to retrieve translations."
    }))
}

/// POST /api/start_recording
/// Start the translation session
pub async fn start_recording(
    State(state): State<AppState>,
    Json(req): Json<StartRecordingRequest>,
) -> impl IntoResponse {
    let source_lang = req.source_lang.as_deref().map(str::trim).unwrap_or("");
    let target_lang = req.target_lang.as_deref().map(str::trim).unwrap_or("");

    if source_lang.is_empty() || target_lang.is_empty() {
        warn!("start_recording rejected: missing language fields");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "source_lang and target_lang are required".to_string(),
            }),
        )
            .into_response();
    }

    let status = match state.controller.start(source_lang, target_lang).await {
        StartOutcome::Started => "started",
        StartOutcome::AlreadyRecording => "already_recording",
    };

    (StatusCode::OK, Json(StatusResponse { status })).into_response()
}

/// POST /api/stop_recording
/// Stop the session; a legal no-op when nothing is recording
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    state.controller.stop().await;
    Json(StatusResponse { status: "stopped" })
}

/// GET /api/get_translation
/// Drain at most one queued result and report history + current partial
pub async fn get_translation(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.poll().await)
}

/// POST /api/clear_history
pub async fn clear_history(State(state): State<AppState>) -> impl IntoResponse {
    state.controller.clear().await;
    Json(StatusResponse { status: "cleared" })
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
