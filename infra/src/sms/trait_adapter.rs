//! Adapter that implements the core `SmsServiceTrait` on top of any
//! infrastructure [`SmsService`], bridging provider errors into the plain
//! string the OTP engine records as a degraded delivery.

use async_trait::async_trait;
use std::sync::Arc;

use pb_core::services::verification::SmsServiceTrait;

use crate::sms::sms_service::SmsService;

/// Adapter that implements the core SmsServiceTrait for a provider
#[derive(Clone)]
pub struct SmsServiceAdapter {
    inner: Arc<dyn SmsService>,
}

impl SmsServiceAdapter {
    /// Wrap a provider
    pub fn new(inner: Arc<dyn SmsService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsServiceAdapter {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String> {
        self.inner.send_sms(to, body).await.map_err(|e| e.to_string())
    }
}
