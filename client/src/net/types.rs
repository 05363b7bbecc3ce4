//! Wire shapes returned by the `/api/auth` endpoints.
//!
//! Dashboard records (missions, events, profile, chat) come straight from
//! the `records` crate; only the session envelopes live here.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use records::profile::email_label;
use serde::{Deserialize, Serialize};

/// The signed-in account as reported by `/api/auth/me` and `/api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SessionUser {
    /// Short label for the dashboard header, with the same fallback the
    /// profile card uses.
    pub fn label(&self) -> String {
        email_label(self.email.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignUpReply {
    pub user: SessionUser,
    pub confirmation_required: bool,
}

/// Error envelope rendered by every failing `/api` handler.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
