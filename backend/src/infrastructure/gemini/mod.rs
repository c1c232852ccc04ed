/// Google Gemini API adapters for chat and embeddings
mod chat_model;
mod client;
mod embedding_service;
mod error;

pub use chat_model::{GeminiChatModel, DEFAULT_CHAT_MODEL};
pub use client::{GeminiClient, DEFAULT_BASE_URL};
pub use embedding_service::{GeminiEmbeddingService, DEFAULT_EMBEDDING_MODEL, MAX_BATCH_SIZE};
pub use error::{GeminiError, GeminiResult};
