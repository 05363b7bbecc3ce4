use axum::extract::FromRequestParts;
use axum::http::{Request, header};
use mockito::Matcher;

use super::*;
use crate::state::test_helpers;

const USER_ID: &str = "0b7f0b5e-2d4c-4f57-9d0e-3a4e7c1d9a10";

fn session_json() -> String {
    serde_json::json!({
        "access_token": "acc",
        "refresh_token": "ref",
        "expires_in": 600,
        "user": { "id": USER_ID, "email": "pilot@example.com" }
    })
    .to_string()
}

fn creds(email: &str, password: &str) -> CredentialsBody {
    CredentialsBody { email: email.into(), password: password.into() }
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_owned))
        .collect()
}

// =============================================================================
// validation
// =============================================================================

#[test]
fn email_validation() {
    assert_eq!(validate_email("  pilot@example.com ").unwrap(), "pilot@example.com");
    assert!(validate_email("pilot").is_err());
    assert!(validate_email("@example.com").is_err());
    assert!(validate_email("pilot@localhost").is_err());
}

#[test]
fn short_password_rejected() {
    assert!(matches!(creds("a@b.co", "12345").validate(), Err(ApiError::Invalid(_))));
    assert!(creds("a@b.co", "123456").validate().is_ok());
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookies_are_http_only() {
    let session: Session = serde_json::from_str(&session_json()).unwrap();
    let jar = with_session(CookieJar::new(), &session, true);
    let access = jar.get(ACCESS_COOKIE).unwrap();
    assert_eq!(access.value(), "acc");
    assert_eq!(access.http_only(), Some(true));
    assert_eq!(access.secure(), Some(true));
    assert_eq!(access.max_age(), Some(Duration::seconds(600)));
    assert_eq!(jar.get(REFRESH_COOKIE).unwrap().value(), "ref");
}

// =============================================================================
// AuthUser extractor
// =============================================================================

#[tokio::test]
async fn extractor_requires_cookie() {
    let server = mockito::Server::new_async().await;
    let state = test_helpers::test_app_state(&server.url());
    let (mut parts, ()) = Request::builder().uri("/api/auth/me").body(()).unwrap().into_parts();
    let err = AuthUser::from_request_parts(&mut parts, &state).await.err().unwrap();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn extractor_resolves_user_from_cookie() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", "Bearer acc")
        .with_status(200)
        .with_body(serde_json::json!({ "id": USER_ID, "email": "pilot@example.com" }).to_string())
        .create_async()
        .await;
    let state = test_helpers::test_app_state(&server.url());
    let (mut parts, ()) = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("{ACCESS_COOKIE}=acc; theme=dark"))
        .body(())
        .unwrap()
        .into_parts();

    let auth = AuthUser::from_request_parts(&mut parts, &state).await.ok().unwrap();
    assert_eq!(auth.user.id.to_string(), USER_ID);
    assert_eq!(auth.token, "acc");
}

#[tokio::test]
async fn extractor_maps_expired_token_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/auth/v1/user")
        .with_status(401)
        .with_body(r#"{"msg":"JWT expired"}"#)
        .create_async()
        .await;
    let state = test_helpers::test_app_state(&server.url());
    let (mut parts, ()) = Request::builder()
        .header(header::COOKIE, format!("{ACCESS_COOKIE}=old"))
        .body(())
        .unwrap()
        .into_parts();
    let err = AuthUser::from_request_parts(&mut parts, &state).await.err().unwrap();
    assert!(matches!(err, ApiError::Unauthorized));
}

// =============================================================================
// handlers
// =============================================================================

#[tokio::test]
async fn login_sets_session_cookies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
        .with_status(200)
        .with_body(session_json())
        .create_async()
        .await;
    let state = test_helpers::test_app_state(&server.url());

    let (jar, Json(user)) = login(State(state), CookieJar::new(), Json(creds("pilot@example.com", "hunter22")))
        .await
        .unwrap();
    assert_eq!(user.email.as_deref(), Some("pilot@example.com"));
    assert_eq!(jar.get(ACCESS_COOKIE).unwrap().value(), "acc");
    assert_eq!(jar.get(REFRESH_COOKIE).unwrap().value(), "ref");
}

#[tokio::test]
async fn login_bad_credentials_is_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error_description":"Invalid login credentials"}"#)
        .create_async()
        .await;
    let state = test_helpers::test_app_state(&server.url());

    let err = login(State(state), CookieJar::new(), Json(creds("pilot@example.com", "nope")))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[tokio::test]
async fn signup_pending_confirmation_sets_no_cookies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/v1/signup")
        .with_status(200)
        .with_body(serde_json::json!({ "id": USER_ID, "email": "new@example.com" }).to_string())
        .create_async()
        .await;
    let state = test_helpers::test_app_state(&server.url());

    let response = signup(State(state), CookieJar::new(), Json(creds("new@example.com", "secret12")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn refresh_without_cookie_is_unauthorized() {
    let server = mockito::Server::new_async().await;
    let state = test_helpers::test_app_state(&server.url());
    let err = refresh(State(state), CookieJar::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn refresh_rejected_clears_cookies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()))
        .with_status(400)
        .with_body(r#"{"msg":"Invalid Refresh Token"}"#)
        .create_async()
        .await;
    let state = test_helpers::test_app_state(&server.url());
    let jar = CookieJar::new().add(Cookie::new(REFRESH_COOKIE, "spent"));

    let response = refresh(State(state), jar).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with(&format!("{ACCESS_COOKIE}=;"))));
    assert!(cookies.iter().any(|c| c.starts_with(&format!("{REFRESH_COOKIE}=;"))));
}

#[tokio::test]
async fn logout_clears_cookies_even_if_revoke_fails() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/v1/logout")
        .with_status(500)
        .create_async()
        .await;
    let state = test_helpers::test_app_state(&server.url());
    let jar = CookieJar::new().add(Cookie::new(ACCESS_COOKIE, "acc"));

    let response = logout(State(state), jar).await.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(set_cookies(&response).len(), 2);
}
