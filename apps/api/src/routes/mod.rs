pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::prompts::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(handlers::handle_options))
        .route("/api/v1/prompts/generate", post(handlers::handle_generate))
        .route("/api/v1/prompts/download", post(handlers::handle_download))
        .route("/api/v1/prompts/upload", post(handlers::handle_upload))
        .with_state(state)
}
