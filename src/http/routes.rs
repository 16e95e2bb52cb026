use super::handlers;
use super::state::AppState;
use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
///
/// Cross-origin access is limited to the configured allow-list.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        // Service discovery and health
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health_check))
        // Session control
        .route("/api/start_recording", post(handlers::start_recording))
        .route("/api/stop_recording", post(handlers::stop_recording))
        // Translation queries
        .route("/api/get_translation", get(handlers::get_translation))
        .route("/api/clear_history", post(handlers::clear_history))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}
