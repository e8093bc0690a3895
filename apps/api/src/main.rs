mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod resume_text;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::matching::scorer::{KeywordMatchScorer, LlmMatchScorer, MatchScorer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Smart ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Keyword scorer is always on; thresholds come from config
    let policy = config.keyword_policy();
    info!(
        "Keyword policy: cap={} min_frequency={} sparse_threshold={}",
        policy.cap, policy.min_frequency, policy.sparse_threshold
    );
    let keyword_scorer: Arc<dyn MatchScorer> = Arc::new(KeywordMatchScorer { policy });

    // LLM scorer only when an API key is present
    let llm_scorer: Option<Arc<dyn MatchScorer>> = match &config.google_api_key {
        Some(api_key) => {
            let client = GeminiClient::new(
                api_key.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmMatchScorer(Arc::new(client))))
        }
        None => {
            warn!("GOOGLE_API_KEY not set; LLM evaluation endpoints are disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        keyword_scorer,
        llm_scorer,
    };

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
