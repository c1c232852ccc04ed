pub mod dto;
pub mod gateways;
pub mod graph;
pub mod repositories;
pub mod services;
pub mod use_cases;

// Re-export key types
pub use dto::{ChatRequest, ChatResponse, IngestionResponse};
pub use gateways::{ChatModel, Embedder};
pub use graph::{ChatError, ChatGraph, ChatResult, GraphNode, GraphStep};
pub use repositories::VectorRepository;
pub use services::{
    DocumentIngestionService, IngestionConfig, IngestionError, IngestionResult, IngestionSummary,
};
pub use use_cases::{ClassifyQuery, SolveSimpleProblem};
