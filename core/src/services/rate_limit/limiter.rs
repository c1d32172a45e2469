//! In-process sliding-window limiter

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use pb_shared::RateLimitPolicy;

use crate::clock::{Clock, SystemClock};

use super::types::RateLimitDecision;

/// Per-identifier sliding-window request counter
///
/// Keeps the timestamps of permitted requests inside the trailing window.
/// Timestamps at or before `now - window` are pruned on every check; a
/// request is permitted iff fewer than `max_requests` remain, and only
/// permitted requests are recorded.
#[derive(Debug)]
pub struct SlidingWindowRateLimiter {
    policy: RateLimitPolicy,
    enabled: bool,
    clock: Arc<dyn Clock>,
    requests: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
}

impl SlidingWindowRateLimiter {
    /// Create a limiter on the system clock
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Create a limiter on an injected clock
    pub fn with_clock(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            enabled: true,
            clock,
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Turn enforcement on or off; a disabled limiter permits everything
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    fn window(&self) -> Duration {
        Duration::seconds(self.policy.window_seconds as i64)
    }

    /// Check and, if permitted, record a request for `identifier`
    pub fn allow(&self, identifier: &str) -> RateLimitDecision {
        if !self.enabled {
            return RateLimitDecision::Permitted {
                remaining: self.policy.max_requests,
            };
        }

        let now = self.clock.now();
        let window_start = now - self.window();
        let max = self.policy.max_requests as usize;

        let mut requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);
        let timestamps = requests.entry(identifier.to_string()).or_default();
        while timestamps.front().is_some_and(|t| *t <= window_start) {
            timestamps.pop_front();
        }

        if timestamps.len() < max {
            timestamps.push_back(now);
            return RateLimitDecision::Permitted {
                remaining: (max - timestamps.len()) as u32,
            };
        }

        let retry_after_seconds = timestamps
            .front()
            .map(|oldest| {
                let millis = (*oldest + self.window() - now).num_milliseconds().max(0);
                ((millis + 999) / 1000).max(1) as u64
            })
            .unwrap_or(self.policy.window_seconds);

        RateLimitDecision::Limited {
            retry_after_seconds,
            message: format!(
                "Rate limit exceeded. Max {} requests per {} minutes",
                self.policy.max_requests,
                self.policy.window_seconds / 60
            ),
        }
    }

    /// Requests still allowed for `identifier` in the current window
    pub fn remaining(&self, identifier: &str) -> u32 {
        let window_start = self.clock.now() - self.window();
        let requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);
        let used = requests
            .get(identifier)
            .map(|ts| ts.iter().filter(|t| **t > window_start).count())
            .unwrap_or(0) as u32;
        self.policy.max_requests.saturating_sub(used)
    }

    /// Forget all recorded requests for `identifier`
    pub fn reset(&self, identifier: &str) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(identifier);
    }
}
