//! OTP verification service for SMS-based login
//!
//! This module provides the one-time code workflow:
//! - Code and session generation, superseding older codes for the phone
//! - SMS delivery with an explicit degraded-delivery outcome
//! - Verification with expiry, single use and attempt capping

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::SmsServiceTrait;
pub use types::{DeliveryStatus, IssuedChallenge};
