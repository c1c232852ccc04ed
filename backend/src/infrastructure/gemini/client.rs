/// Shared HTTP client for the Gemini REST API
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use super::error::{GeminiError, GeminiResult};

/// Default Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Authenticated connection to the Gemini API
///
/// Built once at startup and shared by the chat model and the embedding
/// service. A missing API key is only reported when a request is made.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> GeminiResult<Self> {
        let http = Client::builder().build().map_err(GeminiError::Client)?;

        Ok(GeminiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// Create a client against the public Gemini endpoint
    pub fn with_api_key(api_key: Option<String>) -> GeminiResult<Self> {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// URL for a model method, e.g. `models/gemini-2.0-flash-exp:generateContent`
    pub fn endpoint_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.base_url,
            model.trim_start_matches("models/"),
            method
        )
    }

    /// POST a JSON body to a model method and decode the JSON reply
    pub async fn post_model<T: DeserializeOwned>(
        &self,
        model: &str,
        method: &str,
        body: &Value,
    ) -> GeminiResult<T> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = self.endpoint_url(model, method);

        debug!(model, method, "Sending Gemini request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body_text);
            error!(model, method, status = status.as_u16(), "Gemini request failed: {}", message);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body_text)
            .map_err(|e| GeminiError::ResponseParse(format!("invalid JSON in response: {}", e)))
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extract `error.message` from an API error body, falling back to the raw text
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
