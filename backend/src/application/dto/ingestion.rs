use serde::{Deserialize, Serialize};

use crate::application::services::IngestionSummary;

/// Response body of the document upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResponse {
    /// `null` when the upload carried no filename
    pub filename: Option<String>,
    pub chunks: usize,
    pub collection: String,
}

impl From<IngestionSummary> for IngestionResponse {
    fn from(summary: IngestionSummary) -> Self {
        IngestionResponse {
            filename: summary.filename,
            chunks: summary.chunks,
            collection: summary.collection.as_str().to_string(),
        }
    }
}
