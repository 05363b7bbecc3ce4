//! Profile routes: the caller's row in `profiles` plus avatar upload.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::Json;
use chrono::Utc;
use records::{AvatarUpload, Profile, ProfileUpdate};
use serde::Serialize;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

const TABLE: &str = "profiles";

#[derive(Serialize)]
struct ProfileWrite<'a> {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    /// Outer `None` leaves the column alone; `Some(None)` writes `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
    updated_at: chrono::DateTime<Utc>,
}

impl<'a> ProfileWrite<'a> {
    fn new(auth: &'a AuthUser) -> Self {
        Self {
            id: auth.user.id.to_string(),
            email: auth.user.email.as_deref(),
            display_name: None,
            bio: None,
            avatar_url: None,
            updated_at: Utc::now(),
        }
    }

    /// Write the cleaned fields the request actually carried. `sent` is the
    /// update as received, before blanks were folded into `None`.
    fn with_update(self, sent: &ProfileUpdate, clean: &'a ProfileUpdate) -> Self {
        Self {
            display_name: sent.display_name.is_some().then_some(clean.display_name.as_deref()),
            bio: sent.bio.is_some().then_some(clean.bio.as_deref()),
            ..self
        }
    }
}

/// `GET /api/profile`: created on first read.
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Profile>, ApiError> {
    let id_filter = format!("eq.{}", auth.user.id);
    let existing: Vec<Profile> = state
        .supabase
        .select_rows(TABLE, &auth.token, &[("id", &id_filter)])
        .await?;
    if let Some(profile) = existing.into_iter().next() {
        return Ok(Json(profile));
    }
    tracing::info!(user_id = %auth.user.id, "profile: creating on first read");
    let created: Profile = state
        .supabase
        .upsert_row(TABLE, &auth.token, &ProfileWrite::new(&auth))
        .await?;
    Ok(Json(created))
}

/// `PATCH /api/profile`: absent fields are kept, blank ones are cleared.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(sent): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    let clean = sent.clone().validate()?;
    let write = ProfileWrite::new(&auth).with_update(&sent, &clean);
    let saved: Profile = state.supabase.upsert_row(TABLE, &auth.token, &write).await?;
    Ok(Json(saved))
}

/// `POST /api/profile/avatar`: raw image body; `Content-Type` names the format.
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Profile>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let upload = AvatarUpload::validate(content_type, body.len())?;
    let path = upload.object_path(&auth.user.id.to_string());
    let bucket = &state.config.supabase.avatar_bucket;

    state
        .supabase
        .upload_object(bucket, &path, &auth.token, upload.content_type, body)
        .await?;

    // Same object path on every upload, so bust caches with a version query.
    let now = Utc::now();
    let url = format!("{}?v={}", state.supabase.public_object_url(bucket, &path), now.timestamp());
    let write = ProfileWrite { avatar_url: Some(&url), updated_at: now, ..ProfileWrite::new(&auth) };
    let saved: Profile = state.supabase.upsert_row(TABLE, &auth.token, &write).await?;
    tracing::info!(user_id = %auth.user.id, %path, "profile: avatar uploaded");
    Ok(Json(saved))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
