//! Supabase REST client.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` talks to the three Supabase services the dashboard
//! uses: GoTrue (`/auth/v1`), PostgREST (`/rest/v1`) and Storage
//! (`/storage/v1`). Every request carries the project anon key as `apikey`;
//! row and storage calls also carry the caller's access token so row-level
//! security is enforced by Supabase, not here.
//!
//! Vendor failures are surfaced as [`SupabaseError::Api`] with the HTTP status
//! and the best human-readable message found in the body. Nothing is retried.

pub mod auth;
pub mod rows;
pub mod storage;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::SupabaseConfig;

pub use auth::{Session, SignUpOutcome, SupabaseUser};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    #[error("supabase request failed: {0}")]
    Request(String),
    #[error("supabase returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected supabase response: {0}")]
    Parse(String),
    #[error("failed to build http client: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// # Errors
    ///
    /// Returns [`SupabaseError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SupabaseError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.url.trim_end_matches('/').to_owned(), anon_key: config.anon_key.clone() })
    }

    /// Start a request against `path` (leading slash included).
    ///
    /// Without a user token the anon key doubles as the bearer, which is what
    /// GoTrue expects for signup, login and recovery.
    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(&self.anon_key);
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header("apikey", &self.anon_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {bearer}"))
    }
}

// =============================================================================
// RESPONSE HELPERS
// =============================================================================

/// Send and decode a JSON body, mapping non-2xx statuses to [`SupabaseError::Api`].
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, SupabaseError> {
    let text = send_text(request).await?;
    serde_json::from_str(&text).map_err(|e| SupabaseError::Parse(e.to_string()))
}

/// Send and discard the body.
async fn send_empty(request: RequestBuilder) -> Result<(), SupabaseError> {
    send_text(request).await.map(|_| ())
}

async fn send_text(request: RequestBuilder) -> Result<String, SupabaseError> {
    let response = request
        .send()
        .await
        .map_err(|e| SupabaseError::Request(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SupabaseError::Request(e.to_string()))?;
    if !status.is_success() {
        let message = api_error_message(&body);
        tracing::warn!(status = status.as_u16(), %message, "supabase call failed");
        return Err(SupabaseError::Api { status: status.as_u16(), message });
    }
    Ok(body)
}

/// Pull the most useful message out of a Supabase error body.
///
/// GoTrue uses `msg` or `error_description`, PostgREST uses `message`, and
/// Storage uses `error` / `message`. Falls back to the raw body.
#[must_use]
pub fn api_error_message(body: &str) -> String {
    const MAX_RAW_CHARS: usize = 200;
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let field = parsed.as_ref().and_then(|v| {
        ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| v.get(key).and_then(serde_json::Value::as_str))
            .filter(|m| !m.trim().is_empty())
            .map(str::to_owned)
    });
    field.unwrap_or_else(|| {
        let raw = body.trim();
        if raw.is_empty() {
            "no response body".to_owned()
        } else {
            raw.chars().take(MAX_RAW_CHARS).collect()
        }
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
