//! Mock SMS Service Implementation
//!
//! Logs messages instead of sending them. Selected with `SMS_PROVIDER=mock`
//! and used by development setups where no SMS account is available.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use pb_shared::phone::{is_valid_login_phone, mask_phone_number};

use super::sms_service::{check_message_length, SmsService};
use crate::InfrastructureError;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs SMS messages through `tracing`
/// - Validates phone numbers
/// - Generates mock message IDs
/// - Tracks message count for testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that fails every send
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if !is_valid_login_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }
        check_message_length(message)?;

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                target: "sms_service",
                provider = "mock",
                phone = %masked_phone,
                "Mock SMS service simulating failure"
            );
            return Err(InfrastructureError::Sms("Simulated SMS sending failure".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_number = count,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
