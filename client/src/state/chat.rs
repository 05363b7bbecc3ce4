//! Assistant conversation state.
//!
//! DESIGN
//! ======
//! The transcript is session-only. `begin` snapshots the history sent with a
//! prompt before appending the prompt itself, so the server never sees the
//! new user turn twice.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use records::chat::{trim_history, validate_prompt};
use records::{ChatRequest, ChatTurn};

/// Turns of context sent with each prompt.
pub const HISTORY_TURNS: usize = 12;

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub turns: Vec<ChatTurn>,
    pub pending: bool,
    pub error: Option<String>,
}

impl ChatState {
    /// Start a request for `raw`. Returns `None` while another request is in
    /// flight or when the prompt is blank (recorded in `error`).
    pub fn begin(&mut self, raw: &str) -> Option<ChatRequest> {
        if self.pending {
            return None;
        }
        let prompt = match validate_prompt(raw) {
            Ok(p) => p,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };
        let history = trim_history(&self.turns, HISTORY_TURNS);
        self.turns.push(ChatTurn::user(prompt.clone()));
        self.pending = true;
        self.error = None;
        Some(ChatRequest { prompt, history })
    }

    pub fn finish(&mut self, result: Result<String, String>) {
        self.pending = false;
        match result {
            Ok(text) => self.turns.push(ChatTurn::model(text)),
            Err(message) => self.error = Some(message),
        }
    }

    pub fn clear(&mut self) {
        if !self.pending {
            *self = Self::default();
        }
    }
}
