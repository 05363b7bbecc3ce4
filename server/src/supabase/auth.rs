//! GoTrue auth calls.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SupabaseClient, SupabaseError, send_empty, send_json};

/// The subset of a GoTrue user the dashboard needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Tokens issued by a successful login, signup or refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: SupabaseUser,
}

/// Signup returns a session when the project auto-confirms emails and only
/// the user otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpOutcome {
    Session(Session),
    ConfirmationSent(SupabaseUser),
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl SupabaseClient {
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] when GoTrue rejects the signup.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, SupabaseError> {
        let request = self
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&Credentials { email, password });
        send_json(request).await
    }

    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] with status 400 for bad credentials.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, SupabaseError> {
        let request = self
            .request(Method::POST, "/auth/v1/token?grant_type=password", None)
            .json(&Credentials { email, password });
        send_json(request).await
    }

    /// # Errors
    ///
    /// Returns a [`SupabaseError`] when the refresh token is unknown or spent.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, SupabaseError> {
        let request = self
            .request(Method::POST, "/auth/v1/token?grant_type=refresh_token", None)
            .json(&serde_json::json!({ "refresh_token": refresh_token }));
        send_json(request).await
    }

    /// Revoke the session behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on transport or API failure.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        send_empty(self.request(Method::POST, "/auth/v1/logout", Some(access_token))).await
    }

    /// Resolve an access token to its user. A 401 means the token is expired
    /// or revoked.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on transport or API failure.
    pub async fn get_user(&self, access_token: &str) -> Result<SupabaseUser, SupabaseError> {
        send_json(self.request(Method::GET, "/auth/v1/user", Some(access_token))).await
    }

    /// # Errors
    ///
    /// Returns a [`SupabaseError`] when GoTrue rejects the new password.
    pub async fn update_password(&self, access_token: &str, password: &str) -> Result<SupabaseUser, SupabaseError> {
        let request = self
            .request(Method::PUT, "/auth/v1/user", Some(access_token))
            .json(&serde_json::json!({ "password": password }));
        send_json(request).await
    }

    /// Ask GoTrue to email a password recovery link.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on transport or API failure.
    pub async fn send_password_reset(&self, email: &str, redirect_to: Option<&str>) -> Result<(), SupabaseError> {
        let mut request = self
            .request(Method::POST, "/auth/v1/recover", None)
            .json(&serde_json::json!({ "email": email }));
        if let Some(target) = redirect_to {
            request = request.query(&[("redirect_to", target)]);
        }
        send_empty(request).await
    }
}
