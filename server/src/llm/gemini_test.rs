use super::*;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 100, "candidatesTokenCount": 50, "totalTokenCount": 150 },
        "modelVersion": "gemini-2.0-flash-001"
    })
    .to_string()
}

fn timeouts() -> LlmTimeouts {
    LlmTimeouts { request_secs: 5, connect_secs: 5 }
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "Hello world" }]));
    let resp = parse_response(&json, "gemini-2.0-flash").unwrap();
    assert_eq!(resp.text, "Hello world");
    assert_eq!(resp.model, "gemini-2.0-flash-001");
    assert_eq!(resp.finish_reason, "STOP");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_joins_multiple_parts() {
    let json = make_response(serde_json::json!([{ "text": "Part one. " }, { "text": "Part two." }]));
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.text, "Part one. Part two.");
}

#[test]
fn parse_missing_model_version_uses_requested() {
    let json = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
    })
    .to_string();
    let resp = parse_response(&json, "gemini-x").unwrap();
    assert_eq!(resp.model, "gemini-x");
    assert_eq!(resp.finish_reason, "UNKNOWN");
    assert_eq!((resp.input_tokens, resp.output_tokens), (0, 0));
}

#[test]
fn parse_blocked_prompt_reports_reason() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response(&json, "m").unwrap_err();
    assert!(matches!(err, LlmError::EmptyAnswer(ref r) if r == "SAFETY"));
}

#[test]
fn parse_empty_candidate_text_is_error() {
    let json = serde_json::json!({
        "candidates": [{ "content": { "parts": [] }, "finishReason": "MAX_TOKENS" }]
    })
    .to_string();
    let err = parse_response(&json, "m").unwrap_err();
    assert!(matches!(err, LlmError::EmptyAnswer(ref r) if r == "MAX_TOKENS"));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_response("not json", "m"), Err(LlmError::ApiParse(_))));
}

// =============================================================================
// build_request
// =============================================================================

#[test]
fn build_request_maps_roles_and_system() {
    let messages = vec![
        Message { role: Role::User, text: "hi".into() },
        Message { role: Role::Assistant, text: "hello".into() },
    ];
    let body = serde_json::to_value(build_request(256, "be brief", &messages)).unwrap();
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][1]["role"], "model");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
}

#[test]
fn build_request_omits_blank_system() {
    let body = serde_json::to_value(build_request(1, "  ", &[Message::user("x")])).unwrap();
    assert!(body.get("systemInstruction").is_none());
}

// =============================================================================
// HTTP round trip against a mock server
// =============================================================================

#[tokio::test]
async fn chat_posts_to_model_endpoint_with_key_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "k-123")
        .with_status(200)
        .with_body(make_response(serde_json::json!([{ "text": "Plan: focus block at 9." }])))
        .create_async()
        .await;

    let client = GeminiClient::new("k-123".into(), server.url(), timeouts()).unwrap();
    let resp = client
        .chat("gemini-2.0-flash", 128, "sys", &[Message::user("plan my day")])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.text, "Plan: focus block at 9.");
}

#[tokio::test]
async fn chat_non_200_returns_api_response_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/m:generateContent")
        .with_status(429)
        .with_body(r#"{"error":{"message":"quota"}}"#)
        .create_async()
        .await;

    let client = GeminiClient::new("k".into(), server.url(), timeouts()).unwrap();
    let err = client.chat("m", 1, "", &[Message::user("x")]).await.unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 429, ref body } if body.contains("quota")));
}
