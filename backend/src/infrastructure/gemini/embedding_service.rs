/// Gemini embedding service backed by the `batchEmbedContents` endpoint
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use super::client::GeminiClient;
use super::error::{GeminiError, GeminiResult};
use crate::application::gateways::Embedder;
use crate::domain::value_objects::EmbeddingVector;

pub const DEFAULT_EMBEDDING_MODEL: &str = "gemini-embedding-001";

/// Largest batch accepted by `batchEmbedContents`
pub const MAX_BATCH_SIZE: usize = 100;

/// Service for generating document embeddings with Gemini
pub struct GeminiEmbeddingService {
    client: Arc<GeminiClient>,
    model: String,
    batch_size: usize,
}

impl GeminiEmbeddingService {
    pub fn new(client: Arc<GeminiClient>, model: impl AsRef<str>) -> Self {
        GeminiEmbeddingService {
            client,
            model: model.as_ref().trim_start_matches("models/").to_string(),
            batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Set how many texts are sent per request (clamped to 1..=100)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn build_request_body(&self, texts: &[String]) -> Value {
        let model = format!("models/{}", self.model);
        let requests: Vec<Value> = texts
            .iter()
            .map(|text| {
                json!({
                    "model": model,
                    "content": { "parts": [{ "text": text }] },
                    "taskType": "RETRIEVAL_DOCUMENT",
                })
            })
            .collect();

        json!({ "requests": requests })
    }

    async fn embed_batch(&self, texts: &[String]) -> GeminiResult<Vec<EmbeddingVector>> {
        let body = self.build_request_body(texts);
        let response: BatchEmbedResponse = self
            .client
            .post_model(&self.model, "batchEmbedContents", &body)
            .await?;

        parse_embeddings(response, texts.len())
    }
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

fn parse_embeddings(
    response: BatchEmbedResponse,
    expected: usize,
) -> GeminiResult<Vec<EmbeddingVector>> {
    if response.embeddings.len() != expected {
        return Err(GeminiError::ResponseParse(format!(
            "expected {} embeddings, got {}",
            expected,
            response.embeddings.len()
        )));
    }

    response
        .embeddings
        .into_iter()
        .map(|embedding| {
            EmbeddingVector::new(embedding.values)
                .map_err(|e| GeminiError::ResponseParse(e.to_string()))
        })
        .collect()
}

#[async_trait]
impl Embedder for GeminiEmbeddingService {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts with {}", texts.len(), self.model);

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            let batch_embeddings = self
                .embed_batch(batch)
                .await
                .context("Failed to generate batch embeddings")?;
            embeddings.extend(batch_embeddings);
        }

        debug!("Generated {} embeddings successfully", embeddings.len());
        Ok(embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
