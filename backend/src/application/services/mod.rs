pub mod ingestion_service;

pub use ingestion_service::{
    decode_dropping_invalid, DocumentIngestionService, IngestionConfig, IngestionError,
    IngestionResult, IngestionSummary,
};
