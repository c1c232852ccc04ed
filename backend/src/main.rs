use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use math_assistant::api::{self, AppState};
use math_assistant::application::{ChatGraph, DocumentIngestionService};
use math_assistant::config::AppConfig;
use math_assistant::infrastructure::embeddings::QdrantVectorStore;
use math_assistant::infrastructure::gemini::{
    GeminiChatModel, GeminiClient, GeminiEmbeddingService,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let gemini = Arc::new(
        GeminiClient::new(&config.gemini_base_url, config.google_api_key.clone())
            .context("Failed to create Gemini client")?,
    );
    if !gemini.has_api_key() {
        warn!("GOOGLE_API_KEY is not set; chat and embedding requests will fail");
    }

    let embedder = GeminiEmbeddingService::new(gemini.clone(), &config.embedding_model)
        .with_batch_size(config.embedding_batch_size);
    let vector_store = QdrantVectorStore::new(&config.qdrant_url, config.qdrant_api_key.clone())?;
    let ingestion = DocumentIngestionService::new(
        config.ingestion(),
        Arc::new(embedder),
        Arc::new(vector_store),
    )?;

    let chat_model = GeminiChatModel::new(gemini, &config.chat_model);
    let chat = ChatGraph::from_model(Arc::new(chat_model));

    let app = api::router(AppState::new(ingestion, chat), config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
