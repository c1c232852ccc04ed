/// HTTP API built on axum
mod chat;
mod doc_embeddings;
mod error;

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::{graph::ChatGraph, services::DocumentIngestionService};

pub use error::ApiError;

/// Shared handler state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub ingestion: Arc<DocumentIngestionService>,
    pub chat: Arc<ChatGraph>,
}

impl AppState {
    pub fn new(ingestion: DocumentIngestionService, chat: ChatGraph) -> Self {
        AppState {
            ingestion: Arc::new(ingestion),
            chat: Arc::new(chat),
        }
    }
}

/// Build the application router
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/doc_embeddings", post(doc_embeddings::upload_document))
        .route("/api/chat", post(chat::ask))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
