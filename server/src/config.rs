//! Process configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` before calling
//! [`AppConfig::from_env`], so every key below can live in either place.
//! Missing Supabase settings are fatal; a missing LLM key only disables the
//! assistant (see [`crate::llm::config`]).

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AVATAR_BUCKET: &str = "avatars";
pub const DEFAULT_SUPABASE_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_AI_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_AI_MAX_HISTORY_TURNS: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Supabase project coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: String,
    pub avatar_bucket: String,
    pub timeout: Duration,
}

/// Limits applied to `POST /api/chat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLimits {
    pub per_user: usize,
    pub per_user_window: Duration,
    pub global: usize,
    pub global_window: Duration,
    pub token_budget: u64,
    pub token_window: Duration,
    pub max_tokens: u32,
    pub max_history_turns: usize,
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self {
            per_user: 10,
            per_user_window: Duration::from_secs(60),
            global: 20,
            global_window: Duration::from_secs(60),
            token_budget: 50_000,
            token_window: Duration::from_secs(3600),
            max_tokens: DEFAULT_AI_MAX_TOKENS,
            max_history_turns: DEFAULT_AI_MAX_HISTORY_TURNS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub supabase: SupabaseConfig,
    pub cookie_secure: bool,
    /// Public origin, used as the landing page for password recovery emails.
    pub public_url: Option<String>,
    pub chat: ChatLimits,
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Required: `SUPABASE_URL`, `SUPABASE_ANON_KEY`.
    ///
    /// Optional: `PORT`, `SUPABASE_AVATAR_BUCKET`, `SUPABASE_TIMEOUT_SECS`,
    /// `COOKIE_SECURE`, `PUBLIC_URL`, `RATE_LIMIT_*`, `AI_MAX_TOKENS`,
    /// `AI_MAX_HISTORY_TURNS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is absent or `PORT` does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let url = require("SUPABASE_URL")?.trim_end_matches('/').to_owned();
        let anon_key = require("SUPABASE_ANON_KEY")?;
        let supabase = SupabaseConfig {
            url,
            anon_key,
            avatar_bucket: std::env::var("SUPABASE_AVATAR_BUCKET").unwrap_or_else(|_| DEFAULT_AVATAR_BUCKET.to_owned()),
            timeout: Duration::from_secs(env_parse("SUPABASE_TIMEOUT_SECS", DEFAULT_SUPABASE_TIMEOUT_SECS)),
        };

        let public_url = std::env::var("PUBLIC_URL")
            .ok()
            .map(|u| u.trim().trim_end_matches('/').to_owned())
            .filter(|u| !u.is_empty());
        let cookie_secure = env_bool("COOKIE_SECURE")
            .unwrap_or_else(|| public_url.as_deref().is_some_and(|u| u.starts_with("https://")));

        let defaults = ChatLimits::default();
        let chat = ChatLimits {
            per_user: env_parse("RATE_LIMIT_PER_CLIENT", defaults.per_user),
            per_user_window: secs_or("RATE_LIMIT_PER_CLIENT_WINDOW_SECS", defaults.per_user_window),
            global: env_parse("RATE_LIMIT_GLOBAL", defaults.global),
            global_window: secs_or("RATE_LIMIT_GLOBAL_WINDOW_SECS", defaults.global_window),
            token_budget: env_parse("RATE_LIMIT_TOKEN_BUDGET", defaults.token_budget),
            token_window: secs_or("RATE_LIMIT_TOKEN_WINDOW_SECS", defaults.token_window),
            max_tokens: env_parse("AI_MAX_TOKENS", defaults.max_tokens),
            max_history_turns: env_parse("AI_MAX_HISTORY_TURNS", defaults.max_history_turns),
        };

        Ok(Self { port, supabase, cookie_secure, public_url, chat })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn secs_or(key: &str, default: Duration) -> Duration {
    Duration::from_secs(env_parse(key, default.as_secs()))
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
