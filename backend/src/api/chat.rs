use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::{error::ApiError, AppState};
use crate::application::dto::{ChatRequest, ChatResponse};

/// `POST /api/chat`: classify a question and answer it on the selected route
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let finished = state.chat.ask(&request.question).await?;
    Ok(Json(ChatResponse::from(&finished)))
}
