//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, String>` where the error is the server's
//! `{"error": ...}` text when it sent one, ready to show in a toast. A `401`
//! on a data endpoint triggers one `POST /api/auth/refresh` and a single
//! retry; the auth endpoints themselves never refresh.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use records::{AgendaDraft, AgendaEvent, ChatReply, ChatRequest, Mission, MissionDraft, MissionPatch, Profile, ProfileUpdate};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{ErrorBody, SessionUser, SignUpReply};

#[cfg(not(feature = "hydrate"))]
const SERVER_ONLY: &str = "not available on server";

/// Endpoints that must not trigger a session refresh on `401`.
const NO_REFRESH: [&str; 4] = ["/api/auth/login", "/api/auth/signup", "/api/auth/refresh", "/api/auth/recover"];

#[derive(Clone, Copy, Debug)]
enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

fn mission_endpoint(id: &str) -> String {
    format!("/api/missions/{id}")
}

fn event_endpoint(id: &str) -> String {
    format!("/api/events/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn should_refresh(url: &str, status: u16) -> bool {
    status == 401 && !NO_REFRESH.contains(&url)
}

/// Turn a failed response into user-facing text.
#[cfg(any(test, feature = "hydrate"))]
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.trim().is_empty() => parsed.error,
        _ => format!("request failed: {status}"),
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
fn builder(verb: Verb, url: &str) -> gloo_net::http::RequestBuilder {
    use gloo_net::http::Request;
    match verb {
        Verb::Get => Request::get(url),
        Verb::Post => Request::post(url),
        Verb::Patch => Request::patch(url),
        Verb::Delete => Request::delete(url),
    }
}

/// Send a request built by `build`, refreshing the session once on `401`.
#[cfg(feature = "hydrate")]
async fn send_with_refresh<F>(url: &str, build: F) -> Result<gloo_net::http::Response, String>
where
    F: Fn() -> Result<gloo_net::http::Request, gloo_net::Error>,
{
    let resp = build().map_err(|e| e.to_string())?.send().await.map_err(|e| e.to_string())?;
    if !should_refresh(url, resp.status()) || !refresh_session().await {
        return Ok(resp);
    }
    build().map_err(|e| e.to_string())?.send().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn fetch(verb: Verb, url: &str, body: Option<String>) -> Result<gloo_net::http::Response, String> {
    let resp = send_with_refresh(url, || match &body {
        Some(json) => builder(verb, url)
            .header("content-type", "application/json")
            .body(json.clone()),
        None => builder(verb, url).build(),
    })
    .await?;
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    log::warn!("{verb:?} {url} failed: {status}");
    Err(error_message(status, &text))
}

async fn call<T: DeserializeOwned>(verb: Verb, url: &str, body: Option<String>) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        fetch(verb, url, body).await?.json::<T>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (verb, url, body);
        Err(SERVER_ONLY.to_owned())
    }
}

async fn call_empty(verb: Verb, url: &str, body: Option<String>) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        fetch(verb, url, body).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (verb, url, body);
        Err(SERVER_ONLY.to_owned())
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

// =============================================================================
// AUTH
// =============================================================================

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<SessionUser> {
    call(Verb::Get, "/api/auth/me", None).await.ok()
}

/// Swap the refresh cookie for a fresh session. Returns `true` on success.
pub async fn refresh_session() -> bool {
    call_empty(Verb::Post, "/api/auth/refresh", None).await.is_ok()
}

/// # Errors
///
/// Returns the server's message when the credentials are rejected.
pub async fn sign_in(email: &str, password: &str) -> Result<SessionUser, String> {
    call(Verb::Post, "/api/auth/login", Some(encode(&Credentials { email, password })?)).await
}

/// # Errors
///
/// Returns the server's message when the account cannot be created.
pub async fn sign_up(email: &str, password: &str) -> Result<SignUpReply, String> {
    call(Verb::Post, "/api/auth/signup", Some(encode(&Credentials { email, password })?)).await
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    let _ = call_empty(Verb::Post, "/api/auth/logout", None).await;
}

/// # Errors
///
/// Returns the server's message when the reset email cannot be sent.
pub async fn request_password_reset(email: &str) -> Result<(), String> {
    call_empty(Verb::Post, "/api/auth/recover", Some(encode(&serde_json::json!({ "email": email }))?)).await
}

/// # Errors
///
/// Returns the server's message when the new password is rejected.
pub async fn change_password(password: &str) -> Result<(), String> {
    call_empty(Verb::Post, "/api/auth/password", Some(encode(&serde_json::json!({ "password": password }))?)).await
}

// =============================================================================
// MISSIONS
// =============================================================================

/// # Errors
///
/// Returns an error string if the list cannot be loaded.
pub async fn list_missions() -> Result<Vec<Mission>, String> {
    call(Verb::Get, "/api/missions", None).await
}

/// # Errors
///
/// Returns an error string if the mission is rejected.
pub async fn create_mission(draft: &MissionDraft) -> Result<Mission, String> {
    call(Verb::Post, "/api/missions", Some(encode(draft)?)).await
}

/// # Errors
///
/// Returns an error string if the update fails or the mission is gone.
pub async fn update_mission(id: &str, patch: &MissionPatch) -> Result<Mission, String> {
    call(Verb::Patch, &mission_endpoint(id), Some(encode(patch)?)).await
}

/// # Errors
///
/// Returns an error string if the delete fails.
pub async fn delete_mission(id: &str) -> Result<(), String> {
    call_empty(Verb::Delete, &mission_endpoint(id), None).await
}

// =============================================================================
// AGENDA
// =============================================================================

/// # Errors
///
/// Returns an error string if the list cannot be loaded.
pub async fn list_events() -> Result<Vec<AgendaEvent>, String> {
    call(Verb::Get, "/api/events", None).await
}

/// # Errors
///
/// Returns an error string if the event is rejected.
pub async fn create_event(draft: &AgendaDraft) -> Result<AgendaEvent, String> {
    call(Verb::Post, "/api/events", Some(encode(draft)?)).await
}

/// # Errors
///
/// Returns an error string if the delete fails.
pub async fn delete_event(id: &str) -> Result<(), String> {
    call_empty(Verb::Delete, &event_endpoint(id), None).await
}

// =============================================================================
// PROFILE
// =============================================================================

/// # Errors
///
/// Returns an error string if the profile cannot be loaded.
pub async fn fetch_profile() -> Result<Profile, String> {
    call(Verb::Get, "/api/profile", None).await
}

/// # Errors
///
/// Returns an error string if the update is rejected.
pub async fn update_profile(update: &ProfileUpdate) -> Result<Profile, String> {
    call(Verb::Patch, "/api/profile", Some(encode(update)?)).await
}

/// Upload `file` as the raw request body; the server stores it and returns
/// the profile with its new avatar URL.
///
/// # Errors
///
/// Returns an error string if the file type or size is rejected.
#[cfg(feature = "hydrate")]
pub async fn upload_avatar(file: web_sys::File) -> Result<Profile, String> {
    const URL: &str = "/api/profile/avatar";
    let content_type = file.type_();
    let resp = send_with_refresh(URL, || {
        builder(Verb::Post, URL)
            .header("content-type", &content_type)
            .body(file.clone())
    })
    .await?;
    if !resp.ok() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(error_message(status, &text));
    }
    resp.json::<Profile>().await.map_err(|e| e.to_string())
}

// =============================================================================
// CHAT
// =============================================================================

/// # Errors
///
/// Returns an error string when the assistant is unavailable or rate limited.
pub async fn send_chat(request: &ChatRequest) -> Result<ChatReply, String> {
    call(Verb::Post, "/api/chat", Some(encode(request)?)).await
}
