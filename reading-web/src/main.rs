//! Servidor web Axum do Reading Helper: upload de texto e anotação de palavras difíceis

mod config;
mod error;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let pipeline = config.build_pipeline()?;
    info!(
        classifier = pipeline.classifier_name(),
        threshold = config.hard_threshold,
        sources = ?pipeline.resolver().source_names(),
        "pipeline pronto"
    );

    let state = Arc::new(AppState::new(pipeline, config.max_upload_bytes));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("🚀 Reading Helper iniciado em http://{}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
