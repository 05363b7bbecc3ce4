use axum::body::to_bytes;

use super::*;

async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn renders_error_object() {
    let (status, body) = body_json(ApiError::NotFound("mission")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "mission not found" }));
}

#[tokio::test]
async fn record_errors_are_unprocessable() {
    let (status, body) = body_json(RecordError::EmptyTitle.into()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], RecordError::EmptyTitle.to_string());
}

#[test]
fn vendor_client_errors_pass_through() {
    for code in [400, 401, 403, 404, 409, 422, 429] {
        let err: ApiError = SupabaseError::Api { status: code, message: "nope".into() }.into();
        assert_eq!(err.status().as_u16(), code);
        assert_eq!(err.to_string(), "nope");
    }
}

#[test]
fn vendor_server_errors_become_bad_gateway() {
    let err: ApiError = SupabaseError::Api { status: 500, message: "pg down".into() }.into();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    assert!(!err.to_string().contains("pg down"));

    let err: ApiError = SupabaseError::Request("timeout".into()).into();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn rate_limit_maps_to_429() {
    let err: ApiError = RateLimitError::PerUserExceeded { limit: 10, window_secs: 60 }.into();
    assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn chat_errors_map_to_statuses() {
    let disabled: ApiError = ChatError::Disabled.into();
    assert_eq!(disabled.status(), StatusCode::SERVICE_UNAVAILABLE);

    let blocked: ApiError = ChatError::Llm(LlmError::EmptyAnswer("SAFETY".into())).into();
    assert_eq!(blocked.status(), StatusCode::BAD_GATEWAY);
    assert!(blocked.to_string().contains("SAFETY"));

    let upstream: ApiError = ChatError::Llm(LlmError::ApiResponse { status: 500, body: "secret detail".into() }).into();
    assert!(!upstream.to_string().contains("secret detail"));

    let empty: ApiError = ChatError::Invalid(RecordError::EmptyPrompt).into();
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
