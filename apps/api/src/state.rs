use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionConnector;
use crate::models::session::ConversationIdSource;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Builds a completion client per request from the resolved credential.
    pub connector: Arc<dyn CompletionConnector>,
    /// Mints the envelope's conversation id.
    pub ids: Arc<dyn ConversationIdSource>,
}
