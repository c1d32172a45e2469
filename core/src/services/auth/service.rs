//! Main authentication service implementation

use std::sync::Arc;

use pb_shared::phone::{
    is_valid_login_phone, is_valid_otp_code, mask_phone_number, with_default_country_code,
};

use crate::domain::value_objects::CustomerProfile;
use crate::errors::{AuthError, BridgeError, OtpError};
use crate::repositories::{CustomerIdentityRepository, OtpChallengeRepository};
use crate::services::bridge::{CommerceAdminApi, CredentialBridge, StorefrontApi};
use crate::services::rate_limit::{RateLimitDecision, SlidingWindowRateLimiter};
use crate::services::verification::{DeliveryStatus, OtpService, SmsServiceTrait};

use super::config::AuthServiceConfig;
use super::types::{SendOtpResult, VerifyOtpResult};

/// Authentication service for the phone login flow
pub struct AuthService<R, S, C, A, F>
where
    R: OtpChallengeRepository,
    S: SmsServiceTrait,
    C: CustomerIdentityRepository,
    A: CommerceAdminApi,
    F: StorefrontApi,
{
    /// OTP issuance and verification
    otp_service: Arc<OtpService<R, S>>,
    /// Credential bridge to the commerce platform
    bridge: Arc<CredentialBridge<C, A, F>>,
    /// Per-phone limit on code issuance
    issue_limiter: Arc<SlidingWindowRateLimiter>,
    /// Per-phone limit on code verification
    verify_limiter: Arc<SlidingWindowRateLimiter>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<R, S, C, A, F> AuthService<R, S, C, A, F>
where
    R: OtpChallengeRepository,
    S: SmsServiceTrait,
    C: CustomerIdentityRepository,
    A: CommerceAdminApi,
    F: StorefrontApi,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `otp_service` - Service for issuing and verifying codes
    /// * `bridge` - Credential bridge to the commerce platform
    /// * `issue_limiter` - Rate limiter for send-otp, keyed by phone
    /// * `verify_limiter` - Rate limiter for verify-otp, keyed by phone
    /// * `config` - Service configuration
    pub fn new(
        otp_service: Arc<OtpService<R, S>>,
        bridge: Arc<CredentialBridge<C, A, F>>,
        issue_limiter: Arc<SlidingWindowRateLimiter>,
        verify_limiter: Arc<SlidingWindowRateLimiter>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            otp_service,
            bridge,
            issue_limiter,
            verify_limiter,
            config,
        }
    }

    /// Normalize and format-check a phone number
    fn validate_phone(&self, phone: &str) -> Result<String, AuthError> {
        let normalized = with_default_country_code(phone, &self.config.default_country_code);
        if !is_valid_login_phone(&normalized) {
            return Err(AuthError::InvalidInput {
                message: "Phone must be in format +[country_code][number] (e.g., +911234567890)"
                    .to_string(),
            });
        }
        Ok(normalized)
    }

    fn check_rate(
        limiter: &SlidingWindowRateLimiter,
        phone: &str,
        action: &'static str,
    ) -> Result<(), AuthError> {
        match limiter.allow(phone) {
            RateLimitDecision::Permitted { .. } => Ok(()),
            RateLimitDecision::Limited {
                retry_after_seconds,
                message,
            } => {
                tracing::warn!(
                    phone = %mask_phone_number(phone),
                    action = action,
                    retry_after_seconds = retry_after_seconds,
                    event = "rate_limit_exceeded",
                    "Rate limit exceeded"
                );
                Err(AuthError::RateLimited {
                    message,
                    retry_after_seconds,
                })
            }
        }
    }

    /// Send a one-time code to a phone number
    ///
    /// This method:
    /// 1. Validates the phone number format (no rate slot consumed on failure)
    /// 2. Checks the issuance rate limit
    /// 3. Issues a challenge and sends the SMS
    ///
    /// SMS failure still returns a session; the status message says so.
    pub async fn send_otp(&self, phone: &str) -> Result<SendOtpResult, AuthError> {
        let phone = self.validate_phone(phone)?;
        Self::check_rate(&self.issue_limiter, &phone, "send_otp")?;

        let issued = self.otp_service.issue(&phone).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone_number(&phone),
                error = %e,
                event = "send_otp_failed",
                "Failed to issue OTP"
            );
            AuthError::from(e)
        })?;

        let message = match &issued.delivery {
            DeliveryStatus::Delivered { .. } => "OTP sent successfully".to_string(),
            DeliveryStatus::Degraded { .. } if self.config.expose_code_on_degraded_delivery => {
                format!(
                    "OTP generated but SMS delivery failed (DEV MODE - OTP: {})",
                    issued.code
                )
            }
            DeliveryStatus::Degraded { .. } => {
                "OTP generated but SMS delivery failed".to_string()
            }
        };

        Ok(SendOtpResult {
            session_id: issued.session_id,
            message,
            delivery: issued.delivery,
            expires_at: issued.expires_at,
        })
    }

    /// Verify a code and log the customer into the commerce platform
    ///
    /// This method:
    /// 1. Validates phone, code and session formats
    /// 2. Checks the verification rate limit
    /// 3. Verifies the code (single use)
    /// 4. Bridges to a platform customer access token
    ///
    /// If the bridge fails the challenge stays verified; the caller requests a
    /// new code, and that login reuses the identity stored before the failure.
    pub async fn verify_otp(
        &self,
        phone: &str,
        code: &str,
        session_id: &str,
    ) -> Result<VerifyOtpResult, AuthError> {
        let phone = self.validate_phone(phone)?;
        if !is_valid_otp_code(code, self.config.code_length) {
            return Err(AuthError::InvalidInput {
                message: format!("OTP must be {} digits", self.config.code_length),
            });
        }
        if session_id.trim().is_empty() {
            return Err(AuthError::InvalidInput {
                message: "session_id is required".to_string(),
            });
        }

        Self::check_rate(&self.verify_limiter, &phone, "verify_otp")?;

        self.otp_service
            .verify(&phone, code, session_id)
            .await
            .map_err(|e| {
                if let OtpError::Storage { .. } = e {
                    tracing::error!(error = %e, event = "verify_otp_storage_failed", "OTP storage failure");
                }
                AuthError::from(e)
            })?;

        let outcome = self.bridge.bridge(&phone).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone_number(&phone),
                error = %e,
                event = "bridge_failed",
                "Failed to authenticate customer after OTP verification"
            );
            AuthError::from(e)
        })?;

        if let Some(existing) = &outcome.preexisting_platform_customer {
            tracing::warn!(
                phone = %mask_phone_number(&phone),
                platform_customer_id = %existing,
                event = "duplicate_platform_account",
                "Logged in through a new platform account; an older one exists for this phone"
            );
        }

        Ok(VerifyOtpResult {
            customer: outcome.identity.profile(),
            access_token: outcome.access_token,
            expires_at: outcome.expires_at,
        })
    }

    /// Public profile of the customer behind a phone number
    pub async fn customer_profile(&self, phone: &str) -> Result<CustomerProfile, AuthError> {
        let phone = self.validate_phone(phone)?;
        self.bridge
            .find_identity(&phone)
            .await
            .map_err(AuthError::from)?
            .map(|identity| identity.profile())
            .ok_or(AuthError::CustomerNotFound)
    }

    /// Whether a local identity exists for a phone number
    pub async fn customer_exists(&self, phone: &str) -> Result<bool, AuthError> {
        let phone = self.validate_phone(phone)?;
        Ok(self
            .bridge
            .find_identity(&phone)
            .await
            .map_err(AuthError::from)?
            .is_some())
    }

    /// Rotate the hidden password of a customer
    pub async fn rotate_customer_password(&self, phone: &str) -> Result<(), AuthError> {
        let phone = self.validate_phone(phone)?;
        self.bridge
            .rotate_password(&phone)
            .await
            .map(|_| ())
            .map_err(|e: BridgeError| {
                tracing::error!(
                    phone = %mask_phone_number(&phone),
                    error = %e,
                    event = "password_rotation_failed",
                    "Failed to rotate hidden password"
                );
                AuthError::from(e)
            })
    }
}
