mod analysis;
mod config;
mod errors;
mod extraction;
mod layout;
mod llm_client;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::LlmResumeAnalyzer;
use crate::config::Config;
use crate::layout::FontFamily;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
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

    info!("Starting Sculptor API v{}", env!("CARGO_PKG_VERSION"));

    // Resolve the output typeface; an unknown name is a setup defect
    let typeface: FontFamily = config
        .resume_typeface
        .parse()
        .context("RESUME_TYPEFACE is not a supported typeface")?;
    info!("Resume typeface: {:?}", typeface);

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(LlmResumeAnalyzer(llm)),
        typeface,
    };

    info!("Upload limit: {} MB", config.max_upload_mb);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
