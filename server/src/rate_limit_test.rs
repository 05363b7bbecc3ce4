use super::*;

fn limits() -> ChatLimits {
    ChatLimits {
        per_user: 3,
        per_user_window: Duration::from_secs(60),
        global: 5,
        global_window: Duration::from_secs(60),
        token_budget: 1_000,
        token_window: Duration::from_secs(3600),
        ..ChatLimits::default()
    }
}

#[test]
fn per_user_allows_up_to_limit() {
    let rl = RateLimiter::new(limits());
    let user = Uuid::new_v4();
    let now = Instant::now();

    for i in 0..3 {
        assert!(rl.check_and_record_at(user, now).is_ok(), "request {i} should succeed");
    }
    assert_eq!(
        rl.check_and_record_at(user, now),
        Err(RateLimitError::PerUserExceeded { limit: 3, window_secs: 60 })
    );
}

#[test]
fn global_allows_up_to_limit() {
    let rl = RateLimiter::new(limits());
    let now = Instant::now();

    for _ in 0..5 {
        rl.check_and_record_at(Uuid::new_v4(), now).unwrap();
    }
    assert!(matches!(
        rl.check_and_record_at(Uuid::new_v4(), now),
        Err(RateLimitError::GlobalExceeded { limit: 5, .. })
    ));
}

#[test]
fn rejected_request_is_not_recorded_globally() {
    let rl = RateLimiter::new(limits());
    let user = Uuid::new_v4();
    let now = Instant::now();
    for _ in 0..3 {
        rl.check_and_record_at(user, now).unwrap();
    }
    assert!(rl.check_and_record_at(user, now).is_err());
    // Two global slots remain because the rejected call did not take one.
    rl.check_and_record_at(Uuid::new_v4(), now).unwrap();
    rl.check_and_record_at(Uuid::new_v4(), now).unwrap();
    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_err());
}

#[test]
fn window_expiry_allows_new_requests() {
    let rl = RateLimiter::new(limits());
    let user = Uuid::new_v4();
    let start = Instant::now();

    for _ in 0..3 {
        rl.check_and_record_at(user, start).unwrap();
    }
    assert!(rl.check_and_record_at(user, start).is_err());

    let later = start + Duration::from_secs(61);
    assert!(rl.check_and_record_at(user, later).is_ok());
}

#[test]
fn token_budget_counts_settled_usage() {
    let rl = RateLimiter::new(limits());
    let user = Uuid::new_v4();
    let now = Instant::now();

    rl.record_tokens_at(user, 1_000, 0, now);
    assert!(matches!(rl.reserve_tokens_at(user, 0, now), Err(RateLimitError::TokenBudgetExceeded { budget: 1_000, .. })));
}

#[test]
fn reservations_block_concurrent_overshoot() {
    let rl = RateLimiter::new(limits());
    let user = Uuid::new_v4();
    let now = Instant::now();

    rl.reserve_tokens_at(user, 600, now).unwrap();
    assert!(rl.reserve_tokens_at(user, 600, now).is_err());

    // Settling with smaller real usage frees headroom.
    rl.record_tokens_at(user, 200, 600, now);
    assert!(rl.reserve_tokens_at(user, 600, now).is_ok());
}

#[test]
fn release_returns_reserved_budget() {
    let rl = RateLimiter::new(limits());
    let user = Uuid::new_v4();

    rl.reserve_tokens(user, 900).unwrap();
    assert!(rl.reserve_tokens(user, 200).is_err());
    rl.release_tokens(user, 900);
    assert!(rl.reserve_tokens(user, 200).is_ok());
}

#[test]
fn token_window_expiry_restores_budget() {
    let rl = RateLimiter::new(limits());
    let user = Uuid::new_v4();
    let start = Instant::now();

    rl.record_tokens_at(user, 1_000, 0, start);
    let later = start + Duration::from_secs(3601);
    assert!(rl.reserve_tokens_at(user, 500, later).is_ok());
}

#[test]
fn consume_spans_multiple_entries() {
    let now = Instant::now();
    let mut deque: VecDeque<(Instant, u64)> = VecDeque::from([(now, 100), (now, 50)]);
    consume(&mut deque, 120);
    assert_eq!(deque.len(), 1);
    assert_eq!(deque[0].1, 30);
}
