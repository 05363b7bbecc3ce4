use super::*;
use crate::net::types::SessionUser;

fn signed_in() -> AuthState {
    AuthState {
        user: Some(SessionUser { id: "u1".to_owned(), email: Some("a@b.co".to_owned()), created_at: None }),
        loading: false,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
    assert!(!should_redirect_home(&state));
}

#[test]
fn no_redirect_either_way_while_loading() {
    let state = AuthState::default();
    assert!(!should_redirect_unauth(&state));
    assert!(!should_redirect_home(&state));
}

#[test]
fn signed_in_user_goes_home() {
    let state = signed_in();
    assert!(!should_redirect_unauth(&state));
    assert!(should_redirect_home(&state));
}
