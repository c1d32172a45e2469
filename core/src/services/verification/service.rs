//! Main OTP service implementation

use std::sync::Arc;

use pb_shared::phone::mask_phone_number;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::OtpChallenge;
use crate::errors::{DomainError, OtpError};
use crate::repositories::OtpChallengeRepository;

use super::config::OtpServiceConfig;
use super::traits::SmsServiceTrait;
use super::types::{DeliveryStatus, IssuedChallenge};

/// OTP service for issuing and verifying one-time codes
pub struct OtpService<R: OtpChallengeRepository, S: SmsServiceTrait> {
    /// Challenge persistence
    challenges: Arc<R>,
    /// SMS transport for delivering codes
    sms_service: Arc<S>,
    /// Time source for creation and expiry
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
}

fn storage_error(err: DomainError) -> OtpError {
    OtpError::Storage {
        message: err.to_string(),
    }
}

impl<R: OtpChallengeRepository, S: SmsServiceTrait> OtpService<R, S> {
    /// Create a new OTP service on the system clock
    ///
    /// # Arguments
    ///
    /// * `challenges` - Challenge repository implementation
    /// * `sms_service` - SMS transport implementation
    /// * `config` - Service configuration
    pub fn new(challenges: Arc<R>, sms_service: Arc<S>, config: OtpServiceConfig) -> Self {
        Self::with_clock(challenges, sms_service, config, Arc::new(SystemClock))
    }

    /// Create a new OTP service on an injected clock
    pub fn with_clock(
        challenges: Arc<R>,
        sms_service: Arc<S>,
        config: OtpServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            challenges,
            sms_service,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a new challenge for a phone number
    ///
    /// This method:
    /// 1. Generates a code and a session id
    /// 2. Invalidates every older unverified challenge of the phone
    /// 3. Persists the new challenge
    /// 4. Sends the code via SMS
    ///
    /// A failed SMS send does not fail the call; the result reports
    /// [`DeliveryStatus::Degraded`]. A persistence failure does.
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number to send the code to (E.164 format)
    pub async fn issue(&self, phone: &str) -> Result<IssuedChallenge, OtpError> {
        let masked = mask_phone_number(phone);
        let now = self.clock.now();
        let challenge = OtpChallenge::issue(
            phone,
            self.config.code_length,
            self.config.expiration_minutes,
            now,
        );

        let superseded = self
            .challenges
            .invalidate_pending(phone)
            .await
            .map_err(storage_error)?;
        if superseded > 0 {
            tracing::debug!(
                phone = %masked,
                superseded = superseded,
                event = "otp_superseded",
                "Invalidated older unverified challenges"
            );
        }

        let challenge = self.challenges.create(challenge).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to persist OTP challenge"
            );
            storage_error(e)
        })?;

        tracing::info!(
            phone = %masked,
            event = "otp_generated",
            expires_at = %challenge.expires_at,
            "Generated new OTP challenge"
        );

        let body = format!(
            "Your {} verification code is: {}\nValid for {} minutes.",
            self.config.brand_name, challenge.code, self.config.expiration_minutes
        );

        let delivery = match self.sms_service.send_sms(phone, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    phone = %masked,
                    message_id = %message_id,
                    event = "otp_sms_sent",
                    "OTP SMS accepted by provider"
                );
                DeliveryStatus::Delivered { message_id }
            }
            Err(reason) => {
                tracing::warn!(
                    phone = %masked,
                    error = %reason,
                    event = "otp_sms_degraded",
                    "OTP SMS delivery failed; challenge remains valid"
                );
                DeliveryStatus::Degraded { reason }
            }
        };

        Ok(IssuedChallenge {
            session_id: challenge.session_id,
            expires_at: challenge.expires_at,
            delivery,
            code: challenge.code,
        })
    }

    /// Verify a code against the challenge bound to `phone` and `session_id`
    ///
    /// Failures are checked in order: no such challenge, already used,
    /// expired, attempts exhausted, code mismatch. The attempt counter is
    /// incremented and persisted before the code is compared.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpChallenge)` - The verified challenge
    /// * `Err(OtpError)` - Why verification failed
    pub async fn verify(
        &self,
        phone: &str,
        code: &str,
        session_id: &str,
    ) -> Result<OtpChallenge, OtpError> {
        let masked = mask_phone_number(phone);

        let mut challenge = self
            .challenges
            .find_by_phone_and_session(phone, session_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| {
                tracing::warn!(phone = %masked, event = "otp_session_unknown", "No challenge for session");
                OtpError::NoSuchChallenge
            })?;

        let now = self.clock.now();
        if let Err(e) = challenge.record_attempt(now) {
            tracing::warn!(
                phone = %masked,
                reason = %e,
                event = "otp_verification_rejected",
                "OTP challenge no longer usable"
            );
            return Err(e);
        }

        let mut challenge = self.challenges.update(challenge).await.map_err(storage_error)?;

        if let Err(e) = challenge.confirm(code, now) {
            tracing::warn!(
                phone = %masked,
                remaining_attempts = challenge.remaining_attempts(),
                event = "otp_verification_failed",
                "OTP code mismatch"
            );
            return Err(e);
        }

        let challenge = self.challenges.update(challenge).await.map_err(storage_error)?;

        tracing::info!(
            phone = %masked,
            event = "otp_verified_success",
            "OTP challenge verified"
        );

        Ok(challenge)
    }
}
