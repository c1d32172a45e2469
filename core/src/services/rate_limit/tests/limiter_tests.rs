use chrono::{Duration, Utc};
use std::sync::Arc;

use pb_shared::RateLimitPolicy;

use crate::clock::ManualClock;
use crate::services::rate_limit::{RateLimitDecision, SlidingWindowRateLimiter};

fn limiter(max: u32, window: u64) -> (SlidingWindowRateLimiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let limiter = SlidingWindowRateLimiter::with_clock(RateLimitPolicy::new(max, window), clock.clone());
    (limiter, clock)
}

#[test]
fn test_ceiling_then_recovery_after_window() {
    let (limiter, clock) = limiter(3, 100);

    assert!(limiter.allow("+919876543210").is_permitted());
    clock.advance(Duration::seconds(10));
    assert!(limiter.allow("+919876543210").is_permitted());
    clock.advance(Duration::seconds(10));
    assert!(limiter.allow("+919876543210").is_permitted());

    let denied = limiter.allow("+919876543210");
    assert!(!denied.is_permitted());

    // The earliest request was at t=0; at t=100 it leaves the window
    clock.advance(Duration::seconds(80));
    assert!(limiter.allow("+919876543210").is_permitted());
    assert!(!limiter.allow("+919876543210").is_permitted());
}

#[test]
fn test_denied_decision_carries_message_and_retry_after() {
    let (limiter, clock) = limiter(5, 3600);
    for _ in 0..5 {
        assert!(limiter.allow("+919876543210").is_permitted());
    }
    clock.advance(Duration::seconds(600));

    match limiter.allow("+919876543210") {
        RateLimitDecision::Limited { retry_after_seconds, message } => {
            assert_eq!(retry_after_seconds, 3000);
            assert_eq!(message, "Rate limit exceeded. Max 5 requests per 60 minutes");
        }
        other => panic!("Expected Limited, got {:?}", other),
    }
}

#[test]
fn test_denied_requests_are_not_recorded() {
    let (limiter, clock) = limiter(1, 100);
    assert!(limiter.allow("a").is_permitted());

    clock.advance(Duration::seconds(50));
    assert!(!limiter.allow("a").is_permitted());

    // Only the first request counts, so the key frees up at t=100
    clock.advance(Duration::seconds(50));
    assert!(limiter.allow("a").is_permitted());
}

#[test]
fn test_identifiers_are_independent() {
    let (limiter, _clock) = limiter(1, 100);
    assert!(limiter.allow("a").is_permitted());
    assert!(limiter.allow("b").is_permitted());
    assert!(!limiter.allow("a").is_permitted());
}

#[test]
fn test_remaining_and_reset() {
    let (limiter, _clock) = limiter(3, 100);
    assert_eq!(limiter.remaining("a"), 3);

    assert_eq!(limiter.allow("a"), RateLimitDecision::Permitted { remaining: 2 });
    assert_eq!(limiter.remaining("a"), 2);

    limiter.reset("a");
    assert_eq!(limiter.remaining("a"), 3);
}

#[test]
fn test_disabled_limiter_permits_everything() {
    let (limiter, _clock) = limiter(1, 100);
    let limiter = limiter.enabled(false);
    for _ in 0..10 {
        assert!(limiter.allow("a").is_permitted());
    }
}
