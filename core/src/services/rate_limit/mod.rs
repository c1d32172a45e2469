//! Sliding-window rate limiting
//!
//! One limiter instance per protected operation (code issuance, code
//! verification), keyed by phone number. State lives for the process
//! lifetime only.

mod limiter;
mod types;

#[cfg(test)]
mod tests;

pub use limiter::SlidingWindowRateLimiter;
pub use types::RateLimitDecision;
