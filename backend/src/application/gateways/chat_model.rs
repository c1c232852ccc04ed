use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::ChatMessage;

/// A remote chat model that turns a list of messages into one reply.
///
/// Implementations are built once at startup and shared between requests, so
/// they must be safe to call concurrently.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `messages` to the model and return its reply as an assistant message
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<ChatMessage>;

    /// Name of the underlying model
    fn model_name(&self) -> &str;
}
