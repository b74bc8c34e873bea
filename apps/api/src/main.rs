mod config;
mod diagnostics;
mod errors;
mod llm_client;
mod routes;
mod state;
mod submissions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::diagnostics::client::DiagnosticClient;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::submissions::LoggingSubmitter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Elsint API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set: every diagnosis will return the fallback answer");
    }

    // Initialize LLM client
    let gemini = GeminiClient::new(&config.gemini_base_url, &config.gemini_api_key)?;
    let diagnostics = DiagnosticClient::new(
        Arc::new(gemini),
        config.gemini_model.clone(),
        config.contact_info(),
    );
    info!("Diagnostics client initialized (model: {})", diagnostics.model());

    // Submissions are logged for the shop's mailbox; nothing is stored.
    let submitter = Arc::new(LoggingSubmitter::new(config.business_email.clone()));

    let state = AppState {
        diagnostics,
        submitter,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the public site origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
