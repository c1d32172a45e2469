//! SMS Service Interface
//!
//! Defines the provider-side trait for SMS transports and the E.164
//! normalization they share.

use async_trait::async_trait;
use phonenumber::Mode;

use crate::InfrastructureError;

/// Longest body a single provider request accepts
pub const MAX_MESSAGE_LENGTH: usize = 1600;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name ("Twilio", "Mock")
    fn provider_name(&self) -> &str;
}

/// Parse a phone number and render it in E.164 form
///
/// Only numbers that already carry a country code are accepted; the
/// orchestrator applies the default country code before anything reaches a
/// transport.
pub fn to_e164(phone: &str) -> Result<String, InfrastructureError> {
    if !phone.starts_with('+') {
        return Err(InfrastructureError::Sms(
            "Phone number must be in E.164 format (e.g., +919876543210)".to_string(),
        ));
    }

    let parsed = phonenumber::parse(None, phone)
        .map_err(|e| InfrastructureError::Sms(format!("Invalid phone number format: {}", e)))?;

    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Reject bodies the provider would refuse
pub fn check_message_length(message: &str) -> Result<(), InfrastructureError> {
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(InfrastructureError::Sms(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(())
}
