//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the dashboard guard and the login page to coordinate redirects and
//! identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::SessionUser;

/// Authentication state tracking the current user and loading status.
///
/// `loading` starts `true` so the guard waits for `/api/auth/me` before
/// deciding to redirect.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    pub fn resolved(&mut self, user: Option<SessionUser>) {
        self.user = user;
        self.loading = false;
    }

    pub fn signed_out(&mut self) {
        self.resolved(None);
    }

    pub fn is_signed_in(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    pub fn label(&self) -> String {
        self.user.as_ref().map(SessionUser::label).unwrap_or_default()
    }
}
