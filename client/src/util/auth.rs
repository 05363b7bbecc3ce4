//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard redirects signed-out visitors to `/login`; the login page
//! sends signed-in visitors back to `/`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

fn should_redirect_home(state: &AuthState) -> bool {
    !state.loading && state.user.is_some()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Redirect to the dashboard once a session exists.
pub fn install_home_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_home(&auth.get()) {
            navigate("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
