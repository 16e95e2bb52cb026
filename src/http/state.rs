use crate::session::SessionController;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Controller of the single live translation session
    pub controller: Arc<SessionController>,
}

impl AppState {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self { controller }
    }
}
