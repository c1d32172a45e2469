//! SMS Service Module
//!
//! SMS transports used to deliver one-time codes.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Logs messages for development
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Core Adapter**: Exposes any provider as the OTP engine's transport

use std::sync::Arc;

use pb_shared::SmsConfig;

pub mod mock_sms;
pub mod sms_service;
pub mod trait_adapter;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use mock_sms::MockSmsService;
pub use sms_service::{to_e164, SmsService};
pub use trait_adapter::SmsServiceAdapter;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Returns the provider named by `config.provider`. A provider that cannot be
/// initialized falls back to the mock transport with an error log, so the
/// service still starts and issuance reports degraded delivery.
pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        #[cfg(feature = "twilio-sms")]
        "twilio" => {
            let service = TwilioConfig::from_sms_config(config).and_then(TwilioSmsService::new);
            match service {
                Ok(service) => Arc::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize Twilio SMS service: {}", e);
                    tracing::warn!("Falling back to mock SMS service");
                    Arc::new(MockSmsService::new())
                }
            }
        }
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Arc::new(MockSmsService::new())
        }
    }
}
