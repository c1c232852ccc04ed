/// Outbound model interfaces used by the application layer
mod chat_model;
mod embedder;

pub use chat_model::ChatModel;
pub use embedder::Embedder;
