//! Assistant route.

use axum::extract::State;
use axum::response::Json;
use chrono::Utc;
use records::{ChatReply, ChatRequest};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::services::chat::handle_chat;
use crate::state::AppState;

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = handle_chat(&state, auth.user.id, &auth.token, request, Utc::now()).await?;
    Ok(Json(reply))
}
