//! Chat turns exchanged between the Chat panel and the assistant.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Model, text: text.into() }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Response body for `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
}

/// Trim a prompt and reject it when empty.
///
/// # Errors
///
/// Returns [`RecordError::EmptyPrompt`].
pub fn validate_prompt(raw: &str) -> Result<String, RecordError> {
    let prompt = raw.trim();
    if prompt.is_empty() {
        return Err(RecordError::EmptyPrompt);
    }
    Ok(prompt.to_owned())
}

/// Keep the last `max_turns` turns. The kept window never opens with a model
/// turn, since the conversation must start from the user.
#[must_use]
pub fn trim_history(history: &[ChatTurn], max_turns: usize) -> Vec<ChatTurn> {
    let start = history.len().saturating_sub(max_turns);
    history[start..]
        .iter()
        .skip_while(|t| t.role == ChatRole::Model)
        .cloned()
        .collect()
}
