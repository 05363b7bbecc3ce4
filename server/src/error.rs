//! Route-level error type rendered as `{ "error": "<text>" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use records::RecordError;

use crate::llm::types::LlmError;
use crate::rate_limit::RateLimitError;
use crate::services::chat::ChatError;
use crate::supabase::SupabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Invalid(String),
    #[error("not signed in")]
    Unauthorized,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    Unavailable(String),
    /// A Supabase status that carries meaning for the browser.
    #[error("{message}")]
    Vendor { status: StatusCode, message: String },
    #[error("{0}")]
    BadGateway(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Vendor { status, .. } => *status,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        Self::Invalid(e.to_string())
    }
}

impl From<RateLimitError> for ApiError {
    fn from(e: RateLimitError) -> Self {
        Self::RateLimited(e.to_string())
    }
}

/// Statuses forwarded to the browser unchanged.
const PASS_THROUGH: [u16; 7] = [400, 401, 403, 404, 409, 422, 429];

impl From<SupabaseError> for ApiError {
    fn from(e: SupabaseError) -> Self {
        match e {
            SupabaseError::Api { status, message } if PASS_THROUGH.contains(&status) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                Self::Vendor { status, message }
            }
            other => {
                tracing::error!(error = %other, "supabase failure");
                Self::BadGateway("account service unavailable, try again".into())
            }
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Disabled => Self::Unavailable(ChatError::Disabled.to_string()),
            ChatError::Invalid(inner) => inner.into(),
            ChatError::RateLimited(inner) => inner.into(),
            ChatError::Llm(LlmError::EmptyAnswer(reason)) => {
                Self::BadGateway(format!("the assistant returned no answer ({reason})"))
            }
            ChatError::Llm(_) => Self::BadGateway("the assistant is unavailable, try again".into()),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
