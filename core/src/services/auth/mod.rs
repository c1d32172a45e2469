//! Authentication orchestrator
//!
//! Sequences request validation, per-phone rate limiting, the OTP service
//! and the credential bridge, and maps their outcomes to the error
//! categories callers see.

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use types::{SendOtpResult, VerifyOtpResult};
