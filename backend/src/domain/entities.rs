/// Domain entities
use super::base::Entity;
use super::value_objects::{ChunkId, MessageRole};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single role-tagged message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// A bounded-size text fragment of an uploaded document
///
/// Chunks are created during ingestion, embedded and written to the vector
/// store. They are never modified afterwards.
#[derive(Debug, Clone)]
pub struct DocumentChunk {
    id: ChunkId,
    page_content: String,
    metadata: Map<String, Value>,
}

impl DocumentChunk {
    /// Create a chunk with a fresh identity and no metadata
    pub fn new(page_content: impl Into<String>) -> Self {
        DocumentChunk {
            id: ChunkId::generate(),
            page_content: page_content.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn page_content(&self) -> &str {
        &self.page_content
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

impl Entity for DocumentChunk {
    type Id = ChunkId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
