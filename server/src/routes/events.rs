//! Agenda routes: list, create and delete rows in the `events` table.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use records::{AgendaDraft, AgendaEvent};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

const TABLE: &str = "events";

pub async fn list_events(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<AgendaEvent>>, ApiError> {
    let events = state
        .supabase
        .select_rows(TABLE, &auth.token, &[("order", "starts_at.asc")])
        .await?;
    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<AgendaDraft>,
) -> Result<(StatusCode, Json<AgendaEvent>), ApiError> {
    let mut event = AgendaEvent::from_draft(draft.validate()?, Utc::now());
    event.user_id = Some(auth.user.id.to_string());
    let stored: AgendaEvent = state.supabase.insert_row(TABLE, &auth.token, &event).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.supabase.delete_row(TABLE, &auth.token, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("event"))
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
