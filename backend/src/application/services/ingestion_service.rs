/// Service for ingesting uploaded documents into the vector store
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::gateways::Embedder;
use crate::application::repositories::VectorRepository;
use crate::domain::base::DomainError;
use crate::domain::entities::DocumentChunk;
use crate::domain::value_objects::CollectionName;
use crate::infrastructure::embeddings::RecursiveTextSplitter;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Invalid ingestion settings: {0}")]
    Config(#[from] DomainError),

    #[error("Embedding generation failed: {0:#}")]
    Embedding(#[source] anyhow::Error),

    #[error("Embedding service returned {got} vectors for {expected} chunks")]
    EmbeddingCountMismatch { expected: usize, got: usize },

    #[error("Vector store write failed: {0:#}")]
    VectorStore(#[source] anyhow::Error),
}

pub type IngestionResult<T> = Result<T, IngestionError>;

/// Configuration for the ingestion service
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    /// Maximum characters per chunk
    pub chunk_size: usize,
    /// Overlapping characters between consecutive chunks
    pub chunk_overlap: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        IngestionConfig {
            chunk_size: 100,
            chunk_overlap: 0,
        }
    }
}

/// Outcome of ingesting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionSummary {
    /// Name of the uploaded file, when the client sent one
    pub filename: Option<String>,
    pub chunks: usize,
    pub collection: CollectionName,
}

/// Decode bytes as UTF-8, silently dropping invalid sequences
pub fn decode_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Service that splits, embeds and stores uploaded documents
///
/// Every upload goes to the same collection. The collection is created on the
/// first write and appended to afterwards.
pub struct DocumentIngestionService {
    collection: CollectionName,
    splitter: RecursiveTextSplitter,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorRepository>,
}

impl DocumentIngestionService {
    pub fn new(
        config: IngestionConfig,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorRepository>,
    ) -> IngestionResult<Self> {
        info!("Initializing DocumentIngestionService with config: {:?}", config);

        let splitter = RecursiveTextSplitter::new(config.chunk_size, config.chunk_overlap)?;

        Ok(DocumentIngestionService {
            collection: CollectionName::uploaded_docs(),
            splitter,
            embedder,
            vector_store,
        })
    }

    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    /// Split text into chunk documents without embedding them
    pub fn chunk_text(&self, text: &str) -> Vec<DocumentChunk> {
        self.splitter
            .split_text(text)
            .into_iter()
            .map(DocumentChunk::new)
            .collect()
    }

    /// Ingest one uploaded file
    pub async fn ingest(
        &self,
        filename: Option<&str>,
        content: &[u8],
    ) -> IngestionResult<IngestionSummary> {
        let display_name = filename.unwrap_or("<unnamed>");
        info!("Ingesting '{}' ({} bytes)", display_name, content.len());

        let text = decode_dropping_invalid(content);
        let chunks = self.chunk_text(&text);
        let chunk_count = chunks.len();

        if chunks.is_empty() {
            info!("'{}' produced no chunks, nothing to store", display_name);
            return Ok(self.summary(filename, 0));
        }

        let texts: Vec<String> = chunks
            .iter()
            .map(|chunk| chunk.page_content().to_string())
            .collect();

        debug!("Embedding {} chunks with {}", texts.len(), self.embedder.model_name());
        let embeddings = self
            .embedder
            .embed_documents(&texts)
            .await
            .map_err(IngestionError::Embedding)?;

        if embeddings.len() != chunk_count {
            return Err(IngestionError::EmbeddingCountMismatch {
                expected: chunk_count,
                got: embeddings.len(),
            });
        }

        let stored = self
            .vector_store
            .upsert_chunks(&self.collection, chunks.into_iter().zip(embeddings).collect())
            .await
            .map_err(IngestionError::VectorStore)?;

        info!(
            "Completed ingesting '{}': {} chunks, {} stored in '{}'",
            display_name, chunk_count, stored, self.collection
        );

        Ok(self.summary(filename, chunk_count))
    }

    fn summary(&self, filename: Option<&str>, chunks: usize) -> IngestionSummary {
        IngestionSummary {
            filename: filename.map(str::to_string),
            chunks,
            collection: self.collection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::EmbeddingVector;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ConstantEmbedder;

    #[async_trait]
    impl Embedder for ConstantEmbedder {
        async fn embed_documents(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
            texts
                .iter()
                .map(|t| EmbeddingVector::new(vec![t.len() as f32, 1.0]).map_err(Into::into))
                .collect()
        }

        fn model_name(&self) -> &str {
            "constant"
        }
    }

    struct ShortEmbedder;

    #[async_trait]
    impl Embedder for ShortEmbedder {
        async fn embed_documents(&self, _texts: &[String]) -> Result<Vec<EmbeddingVector>> {
            Ok(vec![EmbeddingVector::new(vec![1.0])?])
        }

        fn model_name(&self) -> &str {
            "short"
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl VectorRepository for RecordingStore {
        async fn upsert_chunks(
            &self,
            collection: &CollectionName,
            chunks: Vec<(DocumentChunk, EmbeddingVector)>,
        ) -> Result<usize> {
            let texts: Vec<String> = chunks
                .iter()
                .map(|(c, _)| c.page_content().to_string())
                .collect();
            let count = texts.len();
            self.writes
                .lock()
                .unwrap()
                .push((collection.as_str().to_string(), texts));
            Ok(count)
        }
    }

    fn service(store: Arc<RecordingStore>) -> DocumentIngestionService {
        DocumentIngestionService::new(IngestionConfig::default(), Arc::new(ConstantEmbedder), store)
            .unwrap()
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let bytes = b"x = \xff\xfe2 + 3\xc3";
        assert_eq!(decode_dropping_invalid(bytes), "x = 2 + 3");
        assert_eq!(decode_dropping_invalid("π r²".as_bytes()), "π r²");
    }

    #[tokio::test]
    async fn test_ingest_250_characters() {
        let store = Arc::new(RecordingStore::default());
        let service = service(store.clone());

        let summary = service.ingest(Some("notes.txt"), "7".repeat(250).as_bytes()).await.unwrap();

        assert_eq!(summary.filename.as_deref(), Some("notes.txt"));
        assert_eq!(summary.chunks, 3);
        assert_eq!(summary.collection.as_str(), "math_uploaded_doc");

        let writes = store.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        let lengths: Vec<usize> = writes[0].1.iter().map(|t| t.len()).collect();
        assert_eq!(lengths, vec![100, 100, 50]);
    }

    #[tokio::test]
    async fn test_empty_file_skips_embedding_and_storage() {
        let store = Arc::new(RecordingStore::default());
        let service = service(store.clone());

        let summary = service.ingest(Some("empty.txt"), b"").await.unwrap();

        assert_eq!(summary.chunks, 0);
        assert_eq!(summary.collection.as_str(), "math_uploaded_doc");
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collection_does_not_depend_on_filename() {
        let store = Arc::new(RecordingStore::default());
        let service = service(store.clone());

        for name in [Some("algebra.txt"), Some("other_collection"), Some(""), None] {
            let summary = service.ingest(name, b"a + b = c").await.unwrap();
            assert_eq!(summary.collection, CollectionName::uploaded_docs());
        }

        let writes = store.writes.lock().unwrap();
        assert!(writes.iter().all(|(collection, _)| collection == "math_uploaded_doc"));
    }

    #[tokio::test]
    async fn test_embedding_count_mismatch_is_an_error() {
        let store = Arc::new(RecordingStore::default());
        let service = DocumentIngestionService::new(
            IngestionConfig::default(),
            Arc::new(ShortEmbedder),
            store.clone(),
        )
        .unwrap();

        let result = service.ingest(Some("notes.txt"), "9".repeat(150).as_bytes()).await;

        assert!(matches!(
            result,
            Err(IngestionError::EmbeddingCountMismatch { expected: 2, got: 1 })
        ));
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = IngestionConfig {
            chunk_size: 10,
            chunk_overlap: 10,
        };
        let result = DocumentIngestionService::new(
            config,
            Arc::new(ConstantEmbedder),
            Arc::new(RecordingStore::default()),
        );
        assert!(matches!(result, Err(IngestionError::Config(_))));
    }
}
