//! SMS provider configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// SMS transport selection and credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Provider name: `mock` or `twilio`
    pub provider: String,

    /// Twilio account SID
    pub account_sid: String,

    /// Twilio auth token
    #[serde(skip_serializing)]
    pub auth_token: String,

    /// Sender phone number in E.164 form
    pub from_number: String,

    /// Per-call timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: env_string("SMS_PROVIDER", "mock").to_lowercase(),
            account_sid: env_string("TWILIO_ACCOUNT_SID", ""),
            auth_token: env_string("TWILIO_AUTH_TOKEN", ""),
            from_number: env_string("TWILIO_PHONE_NUMBER", ""),
            request_timeout_secs: env_parse("SMS_REQUEST_TIMEOUT_SECS", 30),
        }
    }

    /// Missing credentials when the Twilio provider is selected
    pub fn missing_twilio_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.account_sid.trim().is_empty() {
            missing.push("TWILIO_ACCOUNT_SID is not set".to_string());
        }
        if self.auth_token.trim().is_empty() {
            missing.push("TWILIO_AUTH_TOKEN is not set".to_string());
        }
        if self.from_number.trim().is_empty() {
            missing.push("TWILIO_PHONE_NUMBER is not set".to_string());
        }
        missing
    }
}
