/// Chunking and vector storage for document ingestion
mod qdrant_store;
mod text_splitter;

pub use qdrant_store::{QdrantVectorStore, DEFAULT_QDRANT_URL};
pub use text_splitter::RecursiveTextSplitter;
