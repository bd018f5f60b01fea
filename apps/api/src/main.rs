mod config;
mod credential;
mod errors;
mod llm_client;
mod models;
mod prompts;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::DeepSeekConnector;
use crate::models::session::UuidConversationIds;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Prompt Organizer API v{}", env!("CARGO_PKG_VERSION"));

    if config.deepseek_api_key.is_none() {
        warn!(
            "{} is not set; requests must carry their own api_key",
            credential::API_KEY_ENV
        );
    }

    let connector = DeepSeekConnector::new(config.deepseek_base_url.clone(), config.llm_timeout);
    info!(
        "Completion endpoint: {} (model: {}, timeout: {}s)",
        config.deepseek_base_url,
        llm_client::MODEL,
        config.llm_timeout.as_secs()
    );

    let state = AppState {
        config: config.clone(),
        connector: Arc::new(connector),
        ids: Arc::new(UuidConversationIds),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
