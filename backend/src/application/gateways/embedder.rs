use anyhow::Result;
use async_trait::async_trait;

use crate::domain::value_objects::EmbeddingVector;

/// Embedding generation for document text
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of documents.
    /// Returns embeddings in the same order as input texts
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>>;

    /// Name of the underlying model
    fn model_name(&self) -> &str;
}
