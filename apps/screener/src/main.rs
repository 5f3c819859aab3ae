mod config;
mod errors;
mod ingest;
mod routes;
mod screening;
mod state;
mod usage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::screening::{LexicalFitScorer, SkillVocabulary};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Screener v{}", env!("CARGO_PKG_VERSION"));

    // Vocabulary is fixed for the life of the process
    let vocabulary = SkillVocabulary::builtin().clone();
    info!("Skill vocabulary loaded ({} tokens)", vocabulary.len());
    let fit_scorer = Arc::new(LexicalFitScorer::new(vocabulary));

    info!(
        "Free tier: {} screens/day, uploads up to {} MB",
        config.free_limit_per_day, config.max_upload_mb
    );

    let today = chrono::Local::now().date_naive();
    let state = AppState::new(config.clone(), fit_scorer, today);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
