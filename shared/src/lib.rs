//! Shared utilities and common types for the PhoneBridge server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and error codes
//! - Utility functions (phone normalization, masking, OTP format checks)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    CommerceConfig, DatabaseConfig, LogFormat, LoggingConfig, OtpConfig,
    RateLimitConfig, RateLimitPolicy, ServerConfig, SmsConfig,
};
pub use errors::{ErrorResponse, error_codes};
pub use utils::phone;
