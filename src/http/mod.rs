//! HTTP API server for browser clients
//!
//! This module provides the JSON API fronting the session controller:
//! - GET  /                      - service discovery
//! - POST /api/start_recording   - start the translation session
//! - POST /api/stop_recording    - stop the session (idempotent)
//! - GET  /api/get_translation   - poll history + current partial
//! - POST /api/clear_history     - reset accumulated history
//! - GET  /health                - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
