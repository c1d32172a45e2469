//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `commerce` - Storefront platform endpoints and credentials
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time code generation and delivery
//! - `rate_limit` - Per-phone limits for code issuance and verification
//! - `server` - HTTP server configuration
//! - `sms` - SMS provider selection and credentials

pub mod commerce;
pub mod database;
pub mod environment;
pub mod otp;
pub mod rate_limit;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use commerce::CommerceConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use rate_limit::{RateLimitConfig, RateLimitPolicy};
pub use server::ServerConfig;
pub use sms::SmsConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// OTP configuration
    pub otp: OtpConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Storefront platform configuration
    pub commerce: CommerceConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::default(),
            commerce: CommerceConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            otp: OtpConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            commerce: CommerceConfig::from_env(),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check that every setting required to talk to the outside world is present.
    ///
    /// Returns the list of problems found; an empty list means the
    /// configuration is usable.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = self.commerce.missing_fields();

        if self.sms.provider == "twilio" {
            problems.extend(self.sms.missing_twilio_fields());
        }
        if self.otp.code_length == 0 || self.otp.code_length > 10 {
            problems.push(format!("OTP_LENGTH must be between 1 and 10, got {}", self.otp.code_length));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or malformed.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a string environment variable with a default.
pub(crate) fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
