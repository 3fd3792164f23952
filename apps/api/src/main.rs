mod analysis;
mod charts;
mod config;
mod errors;
mod insights;
mod llm_client;
mod models;
mod reviews;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::keywords::YakeExtractor;
use crate::analysis::sentiment::VaderScorer;
use crate::analysis::service::ReviewAnalyzer;
use crate::config::Config;
use crate::insights::LlmInsightGenerator;
use crate::llm_client::LlmClient;
use crate::reviews::cache::ReviewCache;
use crate::reviews::fetcher::AppleRssClient;
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

    info!("Starting StoreLens API v{}", env!("CARGO_PKG_VERSION"));

    let review_source = Arc::new(AppleRssClient::new(&config)?);
    info!(
        "Apple RSS client initialized (country: {}, pages: {})",
        config.rss_country, config.rss_max_pages
    );

    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("OPENAI_API_KEY not set; AI insights will return a placeholder");
    }

    let analyzer = ReviewAnalyzer::new(Arc::new(VaderScorer::new()), Arc::new(YakeExtractor::new()?));

    let state = AppState {
        config: config.clone(),
        cache: ReviewCache::new(),
        review_source,
        analyzer,
        insights: Arc::new(LlmInsightGenerator::new(llm)),
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
