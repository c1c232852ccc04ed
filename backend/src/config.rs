/// Application configuration loaded from the environment
use serde::Deserialize;
use std::net::SocketAddr;
use thiserror::Error;

use crate::application::services::IngestionConfig;
use crate::infrastructure::embeddings::DEFAULT_QDRANT_URL;
use crate::infrastructure::gemini::{
    DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, MAX_BATCH_SIZE,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Env(#[from] envy::Error),
}

/// Settings read from environment variables named after the fields
/// (`CHUNK_SIZE`, `QDRANT_URL`, ...). Unset or blank variables keep the
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini API key; calls fail at invocation time when unset
    pub google_api_key: Option<String>,
    pub gemini_base_url: String,
    #[serde(rename = "gemini_chat_model")]
    pub chat_model: String,
    #[serde(rename = "gemini_embedding_model")]
    pub embedding_model: String,
    pub embedding_batch_size: usize,
    /// Qdrant gRPC URL
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            google_api_key: None,
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_batch_size: MAX_BATCH_SIZE,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            qdrant_api_key: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            chunk_size: 100,
            chunk_overlap: 0,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from `(name, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars.into_iter().filter_map(|(name, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (name, value.to_string()))
        });
        Ok(envy::from_iter::<_, Self>(vars)?)
    }

    pub fn ingestion(&self) -> IngestionConfig {
        IngestionConfig {
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
        }
    }
}
