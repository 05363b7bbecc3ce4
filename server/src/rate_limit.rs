//! In-memory rate limiting for `/api/chat`.
//!
//! DESIGN
//! ======
//! Sliding-window counters keyed by Supabase user id. Three limits, all
//! configured through [`ChatLimits`]:
//! - per user: requests per window
//! - global: Gemini calls per window across every user
//! - token budget: prompt + completion tokens per user per window
//!
//! A chat call reserves its worst-case output before going out and settles
//! the reservation with the real usage afterwards, so concurrent requests
//! from one user cannot overshoot the budget together.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::ChatLimits;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("too many assistant requests (max {limit} per {window_secs}s), try again shortly")]
    PerUserExceeded { limit: usize, window_secs: u64 },
    #[error("the assistant is busy (max {limit} requests per {window_secs}s overall), try again shortly")]
    GlobalExceeded { limit: usize, window_secs: u64 },
    #[error("assistant token budget used up (max {budget} tokens per {window_secs}s)")]
    TokenBudgetExceeded { budget: u64, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<Windows>>,
    limits: ChatLimits,
}

#[derive(Default)]
struct Windows {
    user_requests: HashMap<Uuid, VecDeque<Instant>>,
    global_requests: VecDeque<Instant>,
    /// Settled usage: (timestamp, tokens).
    user_tokens: HashMap<Uuid, VecDeque<(Instant, u64)>>,
    /// In-flight reservations: (timestamp, tokens).
    user_reservations: HashMap<Uuid, VecDeque<(Instant, u64)>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(limits: ChatLimits) -> Self {
        Self { inner: Arc::new(Mutex::new(Windows::default())), limits }
    }

    /// Check per-user and global windows, then record the request.
    ///
    /// # Errors
    ///
    /// Returns the first exceeded limit; nothing is recorded in that case.
    pub fn check_and_record(&self, user_id: Uuid) -> Result<(), RateLimitError> {
        self.check_and_record_at(user_id, Instant::now())
    }

    fn check_and_record_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let limits = self.limits;

        prune(&mut inner.global_requests, now, limits.global_window, |t| *t);
        if inner.global_requests.len() >= limits.global {
            return Err(RateLimitError::GlobalExceeded {
                limit: limits.global,
                window_secs: limits.global_window.as_secs(),
            });
        }

        let user_deque = inner.user_requests.entry(user_id).or_default();
        prune(user_deque, now, limits.per_user_window, |t| *t);
        if user_deque.len() >= limits.per_user {
            return Err(RateLimitError::PerUserExceeded {
                limit: limits.per_user,
                window_secs: limits.per_user_window.as_secs(),
            });
        }

        user_deque.push_back(now);
        inner.global_requests.push_back(now);
        Ok(())
    }

    /// Reserve `tokens` against the user's budget.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::TokenBudgetExceeded`] when settled usage plus
    /// open reservations plus `tokens` would exceed the budget.
    pub fn reserve_tokens(&self, user_id: Uuid, tokens: u64) -> Result<(), RateLimitError> {
        self.reserve_tokens_at(user_id, tokens, Instant::now())
    }

    fn reserve_tokens_at(&self, user_id: Uuid, tokens: u64, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let limits = self.limits;
        let exceeded =
            || RateLimitError::TokenBudgetExceeded { budget: limits.token_budget, window_secs: limits.token_window.as_secs() };

        let used = windowed_sum(inner.user_tokens.entry(user_id).or_default(), now, limits.token_window);
        let reserved = windowed_sum(inner.user_reservations.entry(user_id).or_default(), now, limits.token_window);
        let projected = used
            .checked_add(reserved)
            .and_then(|n| n.checked_add(tokens))
            .ok_or_else(exceeded)?;

        // A zero reservation is a plain "any budget left?" probe.
        let over = if tokens == 0 { projected >= limits.token_budget } else { projected > limits.token_budget };
        if over {
            return Err(exceeded());
        }
        if tokens > 0 {
            inner.user_reservations.entry(user_id).or_default().push_back((now, tokens));
        }
        Ok(())
    }

    /// Settle a reservation with the real usage reported by the model.
    pub fn record_tokens(&self, user_id: Uuid, used: u64, reserved: u64) {
        self.record_tokens_at(user_id, used, reserved, Instant::now());
    }

    fn record_tokens_at(&self, user_id: Uuid, used: u64, reserved: u64, now: Instant) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let window = self.limits.token_window;
        let reservations = inner.user_reservations.entry(user_id).or_default();
        prune(reservations, now, window, |(t, _)| *t);
        consume(reservations, reserved);
        let usage = inner.user_tokens.entry(user_id).or_default();
        prune(usage, now, window, |(t, _)| *t);
        usage.push_back((now, used));
    }

    /// Drop a reservation for a call that failed before reporting usage.
    pub fn release_tokens(&self, user_id: Uuid, reserved: u64) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let window = self.limits.token_window;
        let reservations = inner.user_reservations.entry(user_id).or_default();
        prune(reservations, Instant::now(), window, |(t, _)| *t);
        consume(reservations, reserved);
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune<T>(deque: &mut VecDeque<T>, now: Instant, window: Duration, at: impl Fn(&T) -> Instant) {
    while deque.front().is_some_and(|front| now.duration_since(at(front)) > window) {
        deque.pop_front();
    }
}

fn windowed_sum(deque: &mut VecDeque<(Instant, u64)>, now: Instant, window: Duration) -> u64 {
    prune(deque, now, window, |(t, _)| *t);
    deque.iter().map(|(_, n)| n).sum()
}

fn consume(deque: &mut VecDeque<(Instant, u64)>, mut amount: u64) {
    while amount > 0 {
        let Some((_, front)) = deque.front_mut() else {
            break;
        };
        if *front <= amount {
            amount -= *front;
            deque.pop_front();
        } else {
            *front -= amount;
            break;
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
