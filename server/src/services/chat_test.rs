use std::sync::Mutex;

use chrono::TimeZone;
use mockito::Matcher;
use records::{ChatTurn, Priority};

use super::*;
use crate::llm::types::{ChatResponse, Role};
use crate::state::test_helpers;

// =========================================================================
// MockLlm
// =========================================================================

#[derive(Default)]
struct MockLlm {
    calls: Mutex<Vec<(String, Vec<Message>)>>,
    fail: bool,
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn chat(&self, _max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_owned(), messages.to_vec()));
        if self.fail {
            return Err(LlmError::ApiResponse { status: 500, body: "boom".into() });
        }
        Ok(ChatResponse {
            text: "Start with the launch checklist.".into(),
            model: "mock".into(),
            finish_reason: "STOP".into(),
            input_tokens: 40,
            output_tokens: 10,
        })
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
}

fn mission(title: &str, priority: Priority, deadline: Option<DateTime<Utc>>) -> Mission {
    Mission {
        id: records::new_id(),
        user_id: None,
        title: title.into(),
        notes: None,
        priority,
        deadline,
        reminder_at: None,
        reminded: false,
        completed: false,
        created_at: now(),
    }
}

fn event(title: &str, hour: u32) -> AgendaEvent {
    AgendaEvent {
        id: records::new_id(),
        user_id: None,
        title: title.into(),
        starts_at: Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap(),
        ends_at: Utc.with_ymd_and_hms(2026, 3, 14, hour + 1, 0, 0).unwrap(),
        location: Some("Room 4".into()),
        all_day: false,
        created_at: now(),
    }
}

async fn mock_context(server: &mut mockito::ServerGuard, missions: &[Mission], events: &[AgendaEvent]) {
    server
        .mock("GET", "/rest/v1/missions")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(serde_json::to_string(missions).unwrap())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/events")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(serde_json::to_string(events).unwrap())
        .create_async()
        .await;
}

// =========================================================================
// build_system_prompt
// =========================================================================

#[test]
fn system_prompt_empty_day() {
    let prompt = build_system_prompt(&DayContext::default(), now());
    assert!(prompt.contains("Deskboard"));
    assert!(prompt.contains("2026-03-14T09:00Z"));
    assert_eq!(prompt.matches("(none)").count(), 2);
}

#[test]
fn system_prompt_lists_missions_by_priority_and_flags_overdue() {
    let context = DayContext {
        missions: vec![
            mission("Water plants", Priority::Low, None),
            mission("File taxes", Priority::High, Some(now() - chrono::Duration::days(1))),
        ],
        events: vec![event("Standup", 10)],
    };
    let prompt = build_system_prompt(&context, now());
    let taxes = prompt.find("File taxes").unwrap();
    let plants = prompt.find("Water plants").unwrap();
    assert!(taxes < plants, "high priority should be listed first");
    assert!(prompt.contains("[high] \"File taxes\""));
    assert!(prompt.contains("OVERDUE"));
    assert!(prompt.contains("\"Standup\" 2026-03-14T10:00Z to 2026-03-14T11:00Z @ Room 4"));
}

#[test]
fn system_prompt_all_day_event_shows_date_only() {
    let mut offsite = event("Offsite", 0);
    offsite.all_day = true;
    offsite.location = None;
    let prompt = build_system_prompt(&DayContext { missions: vec![], events: vec![offsite] }, now());
    assert!(prompt.contains("\"Offsite\" 2026-03-14 all day\n"));
}

// =========================================================================
// handle_chat
// =========================================================================

#[tokio::test]
async fn chat_disabled_without_llm() {
    let server = mockito::Server::new_async().await;
    let state = test_helpers::test_app_state(&server.url());
    let err = handle_chat(&state, Uuid::new_v4(), "t", ChatRequest { prompt: "hi".into(), history: vec![] }, now())
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Disabled));
}

#[tokio::test]
async fn chat_rejects_blank_prompt_before_calling_model() {
    let server = mockito::Server::new_async().await;
    let llm = Arc::new(MockLlm::default());
    let state = test_helpers::test_app_state_with_llm(&server.url(), llm.clone());
    let err = handle_chat(&state, Uuid::new_v4(), "t", ChatRequest { prompt: "   ".into(), history: vec![] }, now())
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Invalid(RecordError::EmptyPrompt)));
    assert!(llm.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn chat_sends_context_history_and_prompt() {
    let mut server = mockito::Server::new_async().await;
    mock_context(&mut server, &[mission("Ship release", Priority::High, None)], &[event("Design review", 14)]).await;
    let llm = Arc::new(MockLlm::default());
    let state = test_helpers::test_app_state_with_llm(&server.url(), llm.clone());

    let request = ChatRequest {
        prompt: "  What should I do first?  ".into(),
        history: vec![ChatTurn::user("morning"), ChatTurn::model("Good morning!")],
    };
    let reply = handle_chat(&state, Uuid::new_v4(), "user-token", request, now()).await.unwrap();
    assert_eq!(reply.text, "Start with the launch checklist.");

    let calls = llm.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (system, messages) = &calls[0];
    assert!(system.contains("Ship release"));
    assert!(system.contains("Design review"));
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[2], Message::user("What should I do first?"));
}

#[tokio::test]
async fn chat_survives_missing_context() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(500)
        .with_body("{}")
        .create_async()
        .await;
    let llm = Arc::new(MockLlm::default());
    let state = test_helpers::test_app_state_with_llm(&server.url(), llm.clone());

    let reply = handle_chat(&state, Uuid::new_v4(), "t", ChatRequest { prompt: "plan".into(), history: vec![] }, now())
        .await
        .unwrap();
    assert!(!reply.text.is_empty());
    assert!(llm.calls.lock().unwrap()[0].0.contains("(none)"));
}

#[tokio::test]
async fn chat_trims_history_to_configured_turns() {
    let mut server = mockito::Server::new_async().await;
    mock_context(&mut server, &[], &[]).await;
    let llm = Arc::new(MockLlm::default());
    let mut config = test_helpers::test_config(&server.url());
    config.chat.max_history_turns = 2;
    let state = test_helpers::test_app_state_with(config, Some(llm.clone()));

    let history = vec![
        ChatTurn::user("one"),
        ChatTurn::model("two"),
        ChatTurn::user("three"),
        ChatTurn::model("four"),
    ];
    handle_chat(&state, Uuid::new_v4(), "t", ChatRequest { prompt: "five".into(), history }, now())
        .await
        .unwrap();

    let calls = llm.calls.lock().unwrap();
    let texts: Vec<&str> = calls[0].1.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["three", "four", "five"]);
}

#[tokio::test]
async fn chat_rate_limited_after_per_user_limit() {
    let mut server = mockito::Server::new_async().await;
    mock_context(&mut server, &[], &[]).await;
    let llm = Arc::new(MockLlm::default());
    let mut config = test_helpers::test_config(&server.url());
    config.chat.per_user = 1;
    let state = test_helpers::test_app_state_with(config, Some(llm));
    let user = Uuid::new_v4();

    let ask = || ChatRequest { prompt: "hi".into(), history: vec![] };
    handle_chat(&state, user, "t", ask(), now()).await.unwrap();
    let err = handle_chat(&state, user, "t", ask(), now()).await.unwrap_err();
    assert!(matches!(err, ChatError::RateLimited(RateLimitError::PerUserExceeded { .. })));
}

#[tokio::test]
async fn llm_failure_releases_reserved_budget() {
    let mut server = mockito::Server::new_async().await;
    mock_context(&mut server, &[], &[]).await;
    let llm = Arc::new(MockLlm { fail: true, ..MockLlm::default() });
    let mut config = test_helpers::test_config(&server.url());
    config.chat.max_tokens = 600;
    config.chat.token_budget = 1_000;
    let state = test_helpers::test_app_state_with(config, Some(llm));
    let user = Uuid::new_v4();

    let ask = || ChatRequest { prompt: "hi".into(), history: vec![] };
    assert!(matches!(handle_chat(&state, user, "t", ask(), now()).await, Err(ChatError::Llm(_))));
    // Without the release, a second 600-token reservation would exceed 1000.
    assert!(matches!(handle_chat(&state, user, "t", ask(), now()).await, Err(ChatError::Llm(_))));
}
