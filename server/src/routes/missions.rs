//! Mission routes: CRUD over the `missions` table.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use records::mission::sort_missions;
use records::{Mission, MissionDraft, MissionPatch};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

const TABLE: &str = "missions";

/// `GET /api/missions`: the caller's missions, open first.
pub async fn list_missions(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Mission>>, ApiError> {
    let mut missions: Vec<Mission> = state
        .supabase
        .select_rows(TABLE, &auth.token, &[("order", "created_at.asc")])
        .await?;
    sort_missions(&mut missions);
    Ok(Json(missions))
}

/// `POST /api/missions`
pub async fn create_mission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<MissionDraft>,
) -> Result<(StatusCode, Json<Mission>), ApiError> {
    let draft = draft.validate()?;
    let mut mission = Mission::from_draft(draft, Utc::now());
    mission.user_id = Some(auth.user.id.to_string());
    let stored: Mission = state.supabase.insert_row(TABLE, &auth.token, &mission).await?;
    tracing::info!(user_id = %auth.user.id, mission_id = %stored.id, "missions: created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `PATCH /api/missions/{id}`: partial update; also used for toggling and
/// marking reminders as fired.
pub async fn update_mission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<MissionPatch>,
) -> Result<Json<Mission>, ApiError> {
    let mut patch = patch.validate()?;
    if patch.is_empty() {
        return Err(ApiError::Invalid("nothing to update".into()));
    }
    if patch.touches_reminder() {
        let filter = format!("eq.{id}");
        let rows: Vec<Mission> = state
            .supabase
            .select_rows(TABLE, &auth.token, &[("id", filter.as_str())])
            .await?;
        let current = rows.into_iter().next().ok_or(ApiError::NotFound("mission"))?;
        patch = patch.resolve_against(&current);
    }
    state
        .supabase
        .update_rows(TABLE, &auth.token, &id, &patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("mission"))
}

/// `DELETE /api/missions/{id}`
pub async fn delete_mission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.supabase.delete_row(TABLE, &auth.token, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("mission"))
    }
}

#[cfg(test)]
#[path = "missions_test.rs"]
mod tests;
