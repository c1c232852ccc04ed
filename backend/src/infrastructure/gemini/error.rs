use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to Gemini API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid Gemini response: {0}")]
    ResponseParse(String),
}

pub type GeminiResult<T> = Result<T, GeminiError>;
