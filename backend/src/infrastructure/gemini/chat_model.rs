/// Gemini chat model backed by the `generateContent` endpoint
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use super::client::GeminiClient;
use super::error::{GeminiError, GeminiResult};
use crate::application::gateways::ChatModel;
use crate::domain::{entities::ChatMessage, value_objects::MessageRole};

/// Chat model used for both the classifier and the solver
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash-exp";

/// Routing and solving both need deterministic output
const TEMPERATURE: f32 = 0.0;

pub struct GeminiChatModel {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiChatModel {
    /// Create a chat model with deterministic decoding
    pub fn new(client: Arc<GeminiClient>, model: impl Into<String>) -> Self {
        GeminiChatModel {
            client,
            model: model.into(),
        }
    }

    /// Build the `generateContent` request body.
    ///
    /// System messages become the top-level `systemInstruction`; assistant
    /// messages are sent with Gemini's `model` role.
    fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        let system_text: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();

        let contents: Vec<Value> = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| {
                let role = match m.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };
                json!({ "role": role, "parts": [{ "text": m.content }] })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": { "temperature": TEMPERATURE },
        });

        if !system_text.is_empty() {
            body["systemInstruction"] = json!({ "parts": [{ "text": system_text.join("\n\n") }] });
        }

        body
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> GeminiResult<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GeminiError::ResponseParse("response has no candidates".to_string()))?;

    let content = candidate
        .content
        .ok_or_else(|| GeminiError::ResponseParse("candidate has no content".to_string()))?;

    Ok(content.parts.into_iter().filter_map(|p| p.text).collect())
}

#[async_trait]
impl ChatModel for GeminiChatModel {
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        debug!("Invoking {} with {} messages", self.model, messages.len());

        let body = self.build_request_body(messages);
        let response: GenerateContentResponse = self
            .client
            .post_model(&self.model, "generateContent", &body)
            .await?;

        let text = extract_text(response)?;
        debug!("Received {} characters from {}", text.len(), self.model);

        Ok(ChatMessage::assistant(text))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> GeminiChatModel {
        let client = Arc::new(GeminiClient::with_api_key(Some("test-key".into())).unwrap());
        GeminiChatModel::new(client, DEFAULT_CHAT_MODEL)
    }

    #[test]
    fn test_default_model_name() {
        assert_eq!(model().model_name(), "gemini-2.0-flash-exp");
    }

    #[test]
    fn test_request_body_for_single_user_message() {
        let body = model().build_request_body(&[ChatMessage::user("classify this")]);

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "classify this");
        assert_eq!(body["generationConfig"]["temperature"], 0.0);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_request_body_maps_roles() {
        let body = model().build_request_body(&[
            ChatMessage::system("be precise"),
            ChatMessage::user("2+2?"),
            ChatMessage::assistant("4"),
            ChatMessage::user("and 3+3?"),
        ]);

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be precise");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Simple" }, { "text": "\n" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "Simple\n");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(extract_text(response), Err(GeminiError::ResponseParse(_))));

        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } })).unwrap();
        assert!(extract_text(blocked).is_err());
    }
}
