//! Twilio SMS Service Implementation
//!
//! Production SMS delivery through the Twilio API, with bounded retries on
//! transient failures and a per-request timeout.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use pb_shared::phone::mask_phone_number;
use pb_shared::SmsConfig;

use crate::{
    sms::sms_service::{check_message_length, to_e164, SmsService},
    InfrastructureError,
};

/// Twilio SMS service configuration
#[derive(Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Build the Twilio settings from the shared SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let missing = config.missing_twilio_fields();
        if !missing.is_empty() {
            return Err(InfrastructureError::Config(missing.join("; ")));
        }

        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_PHONE_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("max_retries", &self.max_retries)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }

    /// Whether a failed send is worth another attempt
    fn is_retryable(error_msg: &str) -> bool {
        let lowered = error_msg.to_lowercase();
        if lowered.contains("400") || lowered.contains("invalid") {
            return false;
        }
        ["429", "rate", "500", "502", "503", "504", "timed out"]
            .iter()
            .any(|marker| lowered.contains(marker))
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let timeout = Duration::from_secs(self.config.request_timeout_secs);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, message);

            let error_msg = match tokio::time::timeout(timeout, self.client.send_message(msg)).await {
                Ok(Ok(response)) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        response.sid
                    );
                    return Ok(response.sid);
                }
                Ok(Err(e)) => e.to_string(),
                Err(_) => format!("request timed out after {}s", self.config.request_timeout_secs),
            };

            error!(
                "Failed to send SMS (attempt {}/{}): {}",
                attempts, self.config.max_retries, error_msg
            );

            if attempts >= self.config.max_retries {
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    self.config.max_retries, error_msg
                )));
            }

            if !Self::is_retryable(&error_msg) {
                return Err(InfrastructureError::Sms(format!("Invalid request: {}", error_msg)));
            }

            warn!("Transient SMS failure, retrying after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = to_e164(phone_number)?;
        check_message_length(message)?;

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(&normalized_phone),
            message.len()
        );

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sms_config() -> SmsConfig {
        SmsConfig {
            provider: "twilio".to_string(),
            account_sid: "ACtest".to_string(),
            auth_token: "test_token".to_string(),
            from_number: "+15551234567".to_string(),
            request_timeout_secs: 10,
        }
    }

    #[test]
    fn test_config_from_sms_config() {
        let config = TwilioConfig::from_sms_config(&sms_config()).unwrap();
        assert_eq!(config.account_sid, "ACtest");
        assert_eq!(config.from_number, "+15551234567");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
        assert!(!format!("{:?}", config).contains("test_token"));
    }

    #[test]
    fn test_config_requires_credentials() {
        let mut sms = sms_config();
        sms.auth_token.clear();
        let err = TwilioConfig::from_sms_config(&sms).unwrap_err();
        assert!(err.to_string().contains("TWILIO_AUTH_TOKEN"));
    }

    #[test]
    fn test_config_requires_e164_sender() {
        let mut sms = sms_config();
        sms.from_number = "15551234567".to_string();
        let err = TwilioConfig::from_sms_config(&sms).unwrap_err();
        assert!(err.to_string().contains("E.164 format"));
    }

    #[test]
    fn test_retry_classification() {
        assert!(TwilioSmsService::is_retryable("HTTP 503 Service Unavailable"));
        assert!(TwilioSmsService::is_retryable("request timed out after 30s"));
        assert!(!TwilioSmsService::is_retryable("HTTP 400 invalid 'To' number"));
        assert!(!TwilioSmsService::is_retryable("authentication failed"));
    }
}
