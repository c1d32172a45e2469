//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::env_parse;

/// A single sliding-window policy: at most `max_requests` within `window_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitPolicy {
    /// Max requests allowed inside the window
    pub max_requests: u32,

    /// Length of the trailing window in seconds
    pub window_seconds: u64,
}

impl RateLimitPolicy {
    pub const fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Limit on OTP issuance per phone number
    pub issue: RateLimitPolicy,

    /// Limit on OTP verification per phone number
    pub verify: RateLimitPolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            issue: RateLimitPolicy::new(5, 3600),
            verify: RateLimitPolicy::new(10, 600),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables, keeping the defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_parse("RATE_LIMIT_ENABLED", defaults.enabled),
            issue: RateLimitPolicy::new(
                env_parse("OTP_ISSUE_MAX_REQUESTS", defaults.issue.max_requests),
                env_parse("OTP_ISSUE_WINDOW_SECONDS", defaults.issue.window_seconds),
            ),
            verify: RateLimitPolicy::new(
                env_parse("OTP_VERIFY_MAX_REQUESTS", defaults.verify.max_requests),
                env_parse("OTP_VERIFY_WINDOW_SECONDS", defaults.verify.window_seconds),
            ),
        }
    }

    /// Relaxed limits for local development
    pub fn development() -> Self {
        Self {
            enabled: true,
            issue: RateLimitPolicy::new(50, 3600),
            verify: RateLimitPolicy::new(100, 600),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.issue, RateLimitPolicy::new(5, 3600));
        assert_eq!(config.verify, RateLimitPolicy::new(10, 600));
    }
}
