//! rfplens HTTP server
//!
//! Exposes PDF ingestion and RFP chat as network endpoints.

use anyhow::Result;
use rfplens_core::config::Config;
use rfplens_core::db::Database;
use rfplens_core::llm::OpenAiClient;
use rfplens_core::retrieval::VectorRetriever;
use rfplens_server::{create_router, AppState};
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Arc::new(Config::load()?);

    let db_path = std::env::var("RFPLENS_DB")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| Database::default_path());
    let db = Database::open(&db_path)?;
    db.initialize()?;
    let db = Arc::new(Mutex::new(db));

    let client = Arc::new(OpenAiClient::new(config.llm_service.clone())?);
    let retriever = Arc::new(VectorRetriever::new(
        db.clone(),
        client.clone(),
        config.retrieval.min_score,
    ));

    let state = AppState {
        db,
        model: client.clone(),
        embedder: client,
        retriever,
        config,
    };

    let addr = std::env::var("RFPLENS_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("rfplens server listening on {}", addr);

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
