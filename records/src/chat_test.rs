use super::*;

#[test]
fn validate_prompt_trims_and_rejects_blank() {
    assert_eq!(validate_prompt("  plan my day \n").unwrap(), "plan my day");
    assert_eq!(validate_prompt(" \t ").unwrap_err(), RecordError::EmptyPrompt);
}

#[test]
fn trim_history_keeps_tail() {
    let history = vec![
        ChatTurn::user("1"),
        ChatTurn::model("2"),
        ChatTurn::user("3"),
        ChatTurn::model("4"),
    ];
    let kept = trim_history(&history, 2);
    assert_eq!(kept, vec![ChatTurn::user("3"), ChatTurn::model("4")]);
}

#[test]
fn trim_history_drops_leading_model_turn() {
    let history = vec![ChatTurn::user("1"), ChatTurn::model("2"), ChatTurn::user("3")];
    let kept = trim_history(&history, 2);
    assert_eq!(kept, vec![ChatTurn::user("3")]);
}

#[test]
fn trim_history_zero_is_empty() {
    assert!(trim_history(&[ChatTurn::user("1")], 0).is_empty());
}

#[test]
fn chat_request_history_defaults_empty() {
    let req: ChatRequest = serde_json::from_str(r#"{"prompt":"hi"}"#).unwrap();
    assert!(req.history.is_empty());
    let turn: ChatTurn = serde_json::from_str(r#"{"role":"model","text":"ok"}"#).unwrap();
    assert_eq!(turn.role, ChatRole::Model);
}
