use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use super::{error::ApiError, AppState};
use crate::application::dto::IngestionResponse;

/// Multipart field carrying the uploaded document
const FILE_FIELD: &str = "file";

/// `POST /api/doc_embeddings`: chunk, embed and store an uploaded file
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestionResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content = field.bytes().await?;

        let summary = state.ingestion.ingest(filename.as_deref(), &content).await?;
        return Ok(Json(summary.into()));
    }

    Err(ApiError::BadRequest(format!(
        "Missing '{}' field in multipart form",
        FILE_FIELD
    )))
}
