use super::*;

#[test]
fn session_user_label_uses_email_local_part() {
    let user = SessionUser { id: "u1".into(), email: Some("ace@example.com".into()), created_at: None };
    assert_eq!(user.label(), "ace");
}

#[test]
fn session_user_label_falls_back_without_email() {
    let user = SessionUser { id: "u1".into(), email: None, created_at: None };
    assert_eq!(user.label(), "Anonymous");
}

#[test]
fn session_user_tolerates_missing_optional_fields() {
    let user: SessionUser = serde_json::from_str(r#"{"id":"5c2b"}"#).unwrap();
    assert_eq!(user.id, "5c2b");
    assert!(user.email.is_none());
}

#[test]
fn sign_up_reply_parses_confirmation_flag() {
    let reply: SignUpReply =
        serde_json::from_str(r#"{"user":{"id":"u1","email":"a@b.co"},"confirmation_required":true}"#).unwrap();
    assert!(reply.confirmation_required);
    assert_eq!(reply.user.email.as_deref(), Some("a@b.co"));
}
