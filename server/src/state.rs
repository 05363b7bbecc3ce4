//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server keeps no user data of its own: rows, files and sessions live in
//! Supabase, so the state is just configuration plus the two vendor clients
//! and the chat rate limiter.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::supabase::SupabaseClient;

/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub supabase: Arc<SupabaseClient>,
    /// `None` when no Gemini key is configured; `/api/chat` answers 503.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, supabase: SupabaseClient, llm: Option<Arc<dyn LlmChat>>) -> Self {
        let rate_limiter = RateLimiter::new(config.chat);
        Self { config: Arc::new(config), supabase: Arc::new(supabase), llm, rate_limiter }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
