/// Qdrant vector store for uploaded document chunks
use anyhow::{Context, Result};
use async_trait::async_trait;
use qdrant_client::{
    qdrant::{
        CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, VectorParamsBuilder,
    },
    Payload, Qdrant,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::application::repositories::VectorRepository;
use crate::domain::base::Entity;
use crate::domain::entities::DocumentChunk;
use crate::domain::value_objects::{CollectionName, EmbeddingVector};

/// Default gRPC endpoint of a local Qdrant instance
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Vector store implementation using Qdrant
pub struct QdrantVectorStore {
    client: Qdrant,
}

impl QdrantVectorStore {
    /// Create a new Qdrant vector store
    ///
    /// # Arguments
    /// * `url` - Qdrant gRPC URL (e.g., "http://localhost:6334")
    /// * `api_key` - Optional API key for secured deployments
    pub fn new(url: &str, api_key: Option<String>) -> Result<Self> {
        info!("Connecting to Qdrant at {}", url);

        let client = Qdrant::from_url(url)
            .api_key(api_key)
            .build()
            .context("Failed to connect to Qdrant")?;

        Ok(QdrantVectorStore { client })
    }

    /// Create a new store with default local connection
    pub fn new_local() -> Result<Self> {
        Self::new(DEFAULT_QDRANT_URL, None)
    }

    /// Create the collection if it does not exist yet. Never recreates.
    pub async fn ensure_collection(
        &self,
        collection: &CollectionName,
        dimension_count: usize,
    ) -> Result<()> {
        if self.collection_exists(collection).await? {
            debug!("Collection '{}' already exists", collection);
            return Ok(());
        }

        info!("Creating collection: {}", collection);
        let created = self
            .client
            .create_collection(
                CreateCollectionBuilder::new(collection.as_str()).vectors_config(
                    VectorParamsBuilder::new(dimension_count as u64, Distance::Cosine),
                ),
            )
            .await;

        if let Err(e) = created {
            // Another request may have created it in the meantime
            if self.collection_exists(collection).await? {
                warn!("Collection '{}' was created concurrently: {}", collection, e);
                return Ok(());
            }
            return Err(e).context("Failed to create collection");
        }

        info!(
            "Created collection '{}' with {} dimensions",
            collection, dimension_count
        );
        Ok(())
    }

    /// Check if collection exists
    pub async fn collection_exists(&self, collection: &CollectionName) -> Result<bool> {
        let collections = self
            .client
            .list_collections()
            .await
            .context("Failed to list collections")?;
        Ok(collections
            .collections
            .iter()
            .any(|c| c.name == collection.as_str()))
    }

    /// Delete the collection (useful for testing)
    pub async fn delete_collection(&self, collection: &CollectionName) -> Result<()> {
        self.client
            .delete_collection(collection.as_str())
            .await
            .context("Failed to delete collection")?;
        info!("Deleted collection: {}", collection);
        Ok(())
    }

    /// Number of points stored in the collection
    pub async fn points_count(&self, collection: &CollectionName) -> Result<Option<u64>> {
        let info = self
            .client
            .collection_info(collection.as_str())
            .await
            .context("Failed to get collection info")?;

        Ok(info.result.and_then(|result| result.points_count))
    }
}

/// Point payload in the `page_content` / `metadata` document layout
fn chunk_payload(chunk: &DocumentChunk) -> Value {
    json!({
        "page_content": chunk.page_content(),
        "metadata": chunk.metadata(),
    })
}

#[async_trait]
impl VectorRepository for QdrantVectorStore {
    async fn upsert_chunks(
        &self,
        collection: &CollectionName,
        chunks: Vec<(DocumentChunk, EmbeddingVector)>,
    ) -> Result<usize> {
        let Some((_, first_embedding)) = chunks.first() else {
            return Ok(0);
        };

        self.ensure_collection(collection, first_embedding.dimension_count())
            .await?;

        debug!("Inserting batch of {} chunks", chunks.len());

        let points: Result<Vec<PointStruct>> = chunks
            .into_iter()
            .map(|(chunk, embedding)| {
                let payload: Payload = chunk_payload(&chunk)
                    .try_into()
                    .context("Failed to serialize payload")?;

                Ok(PointStruct::new(
                    chunk.id().to_string(),
                    embedding.into_inner(),
                    payload,
                ))
            })
            .collect();
        let points = points?;
        let count = points.len();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection.as_str(), points).wait(true))
            .await
            .context("Failed to insert batch")?;

        debug!("Batch insert of {} points completed", count);
        Ok(count)
    }
}
