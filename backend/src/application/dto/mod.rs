pub mod chat;
pub mod ingestion;

pub use chat::{ChatRequest, ChatResponse};
pub use ingestion::IngestionResponse;
