/// Value objects for the domain layer
use super::base::{DomainError, DomainResult, ValueObject};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Collection every uploaded document is written to
pub const UPLOADED_DOC_COLLECTION: &str = "math_uploaded_doc";

/// A user question handled by the chat graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn new(text: impl Into<String>) -> DomainResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "Question cannot be empty".to_string(),
            ));
        }
        Ok(Question(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Question {}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Routing decision produced by the classifier
///
/// The classifier is expected to answer `simple` or `complex`. Anything else is
/// kept verbatim (after normalization) as `Unrecognized` so callers can decide
/// how to handle it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Simple,
    Complex,
    Unrecognized(String),
}

impl Route {
    /// Parse raw model output: trims surrounding whitespace and lowercases
    pub fn from_label(raw: &str) -> Self {
        let label = raw.trim().to_lowercase();
        match label.as_str() {
            "simple" => Route::Simple,
            "complex" => Route::Complex,
            _ => Route::Unrecognized(label),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Route::Simple => "simple",
            Route::Complex => "complex",
            Route::Unrecognized(label) => label,
        }
    }
}

impl ValueObject for Route {}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a message in the conversation history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl ValueObject for MessageRole {}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        write!(f, "{}", role)
    }
}

/// Name of a vector store collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidValue(
                "Collection name cannot be empty".to_string(),
            ));
        }
        Ok(CollectionName(name))
    }

    /// The collection that holds uploaded documents
    pub fn uploaded_docs() -> Self {
        CollectionName(UPLOADED_DOC_COLLECTION.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for CollectionName {}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a document chunk (a UUID, as required for Qdrant point IDs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn generate() -> Self {
        ChunkId(Uuid::new_v4())
    }

}

impl ValueObject for ChunkId {}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dense embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> DomainResult<Self> {
        if values.is_empty() {
            return Err(DomainError::InvalidValue(
                "Embedding vector cannot be empty".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::InvalidValue(
                "Embedding vector contains non-finite values".to_string(),
            ));
        }
        Ok(EmbeddingVector(values))
    }

    pub fn dimensions(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension_count(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl ValueObject for EmbeddingVector {}
