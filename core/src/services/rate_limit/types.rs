//! Types for rate limiting decisions

/// Outcome of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request allowed and recorded
    Permitted {
        /// Requests left in the current window after this one
        remaining: u32,
    },
    /// Request denied and not recorded
    Limited {
        /// Seconds until the oldest recorded request leaves the window
        retry_after_seconds: u64,
        /// Human readable explanation
        message: String,
    },
}

impl RateLimitDecision {
    pub fn is_permitted(&self) -> bool {
        matches!(self, RateLimitDecision::Permitted { .. })
    }
}
