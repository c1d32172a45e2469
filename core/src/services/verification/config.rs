//! Configuration for the OTP service

use pb_shared::OtpConfig;

use crate::domain::entities::otp_challenge::{DEFAULT_CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of digits in a code
    pub code_length: usize,
    /// Number of minutes before a code expires
    pub expiration_minutes: i64,
    /// Brand name used in the SMS body
    pub brand_name: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            brand_name: String::from("PhoneBridge"),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            expiration_minutes: config.expiration_minutes,
            brand_name: config.brand_name.clone(),
        }
    }
}
