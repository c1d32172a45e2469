//! OTP challenge repository trait.
//!
//! Each call is atomic on its own; the engine never needs multi-call
//! transactions.

use async_trait::async_trait;

use crate::domain::entities::OtpChallenge;
use crate::errors::DomainError;

/// Repository trait for OTP challenge persistence operations
#[async_trait]
pub trait OtpChallengeRepository: Send + Sync {
    /// Store a newly issued challenge
    ///
    /// # Returns
    /// * `Ok(OtpChallenge)` - The stored challenge
    /// * `Err(DomainError::Conflict)` - A challenge with the same session id exists
    async fn create(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError>;

    /// Find the challenge bound to `phone` and `session_id`
    ///
    /// # Returns
    /// * `Ok(Some(OtpChallenge))` - Challenge found, whatever its state
    /// * `Ok(None)` - No challenge matches both keys
    async fn find_by_phone_and_session(
        &self,
        phone: &str,
        session_id: &str,
    ) -> Result<Option<OtpChallenge>, DomainError>;

    /// Mark every unverified challenge of `phone` as verified so it can no
    /// longer be used
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of challenges invalidated
    async fn invalidate_pending(&self, phone: &str) -> Result<u64, DomainError>;

    /// Persist the mutable fields (verified, attempts, verified_at)
    ///
    /// Fields only move forward: a stored `verified` flag is never cleared and
    /// `attempts` never decreases, so a write based on a stale read cannot
    /// revive a challenge that was invalidated in between.
    ///
    /// # Returns
    /// * `Ok(OtpChallenge)` - The challenge as stored after the write
    /// * `Err(DomainError::NotFound)` - The challenge was never stored
    async fn update(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError>;
}
