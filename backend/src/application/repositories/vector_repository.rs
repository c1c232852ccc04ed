use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{entities::DocumentChunk, value_objects::{CollectionName, EmbeddingVector}};

/// Repository trait for storing embedded document chunks.
///
/// Implementations are backed by a vector database. The collection is created
/// on first write if it does not exist; an existing collection is never
/// dropped or recreated.
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Upserts chunks together with their embeddings into `collection`.
    ///
    /// Creates the collection when absent, sizing its vectors from the first
    /// embedding. Returns the number of points written.
    async fn upsert_chunks(
        &self,
        collection: &CollectionName,
        chunks: Vec<(DocumentChunk, EmbeddingVector)>,
    ) -> Result<usize>;
}
