//! Trait for SMS transport integration

use async_trait::async_trait;

/// Trait for SMS transport integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send `body` to `to`, returning the provider's message id
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String>;
}
