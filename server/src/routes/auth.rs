//! Auth routes: Supabase password auth behind HttpOnly session cookies.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::error::ApiError;
use crate::state::AppState;
use crate::supabase::{Session, SignUpOutcome, SupabaseError, SupabaseUser};

pub(crate) const ACCESS_COOKIE: &str = "sb_access_token";
pub(crate) const REFRESH_COOKIE: &str = "sb_refresh_token";
const REFRESH_COOKIE_DAYS: i64 = 30;
const MIN_PASSWORD_CHARS: usize = 6;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user resolved from the access-token cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SupabaseUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(ACCESS_COOKIE).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::Unauthorized);
        }

        let app_state = AppState::from_ref(state);
        let user = app_state.supabase.get_user(token).await.map_err(|e| match e {
            SupabaseError::Api { status: 401 | 403, .. } => ApiError::Unauthorized,
            other => other.into(),
        })?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

pub(crate) fn with_session(jar: CookieJar, session: &Session, secure: bool) -> CookieJar {
    let access_age = Duration::seconds(session.expires_in.unwrap_or(3600));
    jar.add(session_cookie(ACCESS_COOKIE, session.access_token.clone(), access_age, secure))
        .add(session_cookie(
            REFRESH_COOKIE,
            session.refresh_token.clone(),
            Duration::days(REFRESH_COOKIE_DAYS),
            secure,
        ))
}

pub(crate) fn without_session(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, String::new(), Duration::ZERO, secure))
        .add(session_cookie(REFRESH_COOKIE, String::new(), Duration::ZERO, secure))
}

// =============================================================================
// REQUEST / RESPONSE BODIES
// =============================================================================

#[derive(Deserialize)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
}

impl CredentialsBody {
    fn validate(self) -> Result<(String, String), ApiError> {
        let email = validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ApiError::Invalid(format!("password must be at least {MIN_PASSWORD_CHARS} characters")));
        }
        Ok((email, self.password))
    }
}

fn validate_email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email.to_owned()),
        _ => Err(ApiError::Invalid("enter a valid email address".into())),
    }
}

#[derive(Deserialize)]
pub struct EmailBody {
    pub email: String,
}

#[derive(Deserialize)]
pub struct PasswordBody {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpReply {
    pub user: SupabaseUser,
    /// True when Supabase emailed a confirmation link instead of signing in.
    pub confirmation_required: bool,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CredentialsBody>,
) -> Result<Response, ApiError> {
    let (email, password) = body.validate()?;
    let outcome = state.supabase.sign_up(&email, &password).await?;
    tracing::info!(confirmed = matches!(outcome, SignUpOutcome::Session(_)), "auth: signup");
    Ok(match outcome {
        SignUpOutcome::Session(session) => {
            let jar = with_session(jar, &session, state.config.cookie_secure);
            (jar, Json(SignUpReply { user: session.user, confirmation_required: false })).into_response()
        }
        SignUpOutcome::ConfirmationSent(user) => {
            Json(SignUpReply { user, confirmation_required: true }).into_response()
        }
    })
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CredentialsBody>,
) -> Result<(CookieJar, Json<SupabaseUser>), ApiError> {
    let email = validate_email(&body.email)?;
    let session = state
        .supabase
        .sign_in_with_password(&email, &body.password)
        .await
        .map_err(|e| match e {
            SupabaseError::Api { status: 400, message } => {
                ApiError::Vendor { status: StatusCode::UNAUTHORIZED, message }
            }
            other => other.into(),
        })?;
    Ok((with_session(jar, &session, state.config.cookie_secure), Json(session.user)))
}

/// `POST /api/auth/refresh`: swap the refresh cookie for a new session.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let secure = state.config.cookie_secure;
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_owned())
        .unwrap_or_default();
    if refresh_token.is_empty() {
        return Err(ApiError::Unauthorized);
    }
    match state.supabase.refresh_session(&refresh_token).await {
        Ok(session) => Ok((with_session(jar, &session, secure), Json(session.user)).into_response()),
        Err(SupabaseError::Api { status: 400 | 401 | 403, .. }) => {
            Ok((without_session(jar, secure), ApiError::Unauthorized).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// `POST /api/auth/logout`: revoke the session if there is one and clear cookies.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(ACCESS_COOKIE).map(Cookie::value).filter(|t| !t.is_empty()) {
        if let Err(e) = state.supabase.sign_out(token).await {
            tracing::warn!(error = %e, "auth: sign out failed, clearing cookies anyway");
        }
    }
    (without_session(jar, state.config.cookie_secure), StatusCode::NO_CONTENT)
}

/// `POST /api/auth/password`
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<PasswordBody>,
) -> Result<StatusCode, ApiError> {
    if body.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ApiError::Invalid(format!("password must be at least {MIN_PASSWORD_CHARS} characters")));
    }
    state.supabase.update_password(&auth.token, &body.password).await?;
    tracing::info!(user_id = %auth.user.id, "auth: password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/auth/recover`: always 204 for a well-formed email.
pub async fn recover(State(state): State<AppState>, Json(body): Json<EmailBody>) -> Result<StatusCode, ApiError> {
    let email = validate_email(&body.email)?;
    let redirect = state.config.public_url.as_deref().map(|u| format!("{u}/login"));
    state
        .supabase
        .send_password_reset(&email, redirect.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`
pub async fn me(auth: AuthUser) -> Json<SupabaseUser> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
