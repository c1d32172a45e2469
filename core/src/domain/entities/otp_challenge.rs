//! One-time code challenge entity for SMS-based login.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::OtpError;

/// Maximum number of verification attempts allowed per challenge
pub const MAX_ATTEMPTS: u32 = 5;

/// Default length of the one-time code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default expiration time for challenges (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Length of the session identifier bound to a challenge
pub const SESSION_ID_LENGTH: usize = 32;

/// A one-time code sent to a phone and bound to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Unique identifier for the challenge record
    pub id: Uuid,

    /// Phone number the code was sent to (E.164)
    pub phone: String,

    /// The numeric code
    pub code: String,

    /// Random alphanumeric session identifier handed to the caller
    pub session_id: String,

    /// Set on successful verification, or when a newer challenge supersedes this one
    pub verified: bool,

    /// Number of verification attempts made
    pub attempts: u32,

    /// Timestamp when the challenge was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of successful verification
    pub verified_at: Option<DateTime<Utc>>,
}

impl OtpChallenge {
    /// Creates a fresh challenge with a random code and session id
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number the code will be sent to
    /// * `code_length` - Number of digits in the code
    /// * `expiration_minutes` - Minutes until the code expires
    /// * `now` - Creation time
    pub fn issue(
        phone: impl Into<String>,
        code_length: usize,
        expiration_minutes: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            code: Self::generate_code(code_length),
            session_id: Self::generate_session_id(),
            verified: false,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            verified_at: None,
        }
    }

    /// Generates a numeric code from the OS random source
    pub fn generate_code(length: usize) -> String {
        (0..length)
            .map(|_| char::from(b'0' + OsRng.gen_range(0..10u8)))
            .collect()
    }

    /// Generates a 32-character alphanumeric session id from the OS random source
    pub fn generate_session_id() -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Checks whether the code has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Attempts left before the challenge is exhausted
    pub fn remaining_attempts(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Marks the challenge as superseded by a newer one
    pub fn invalidate(&mut self) {
        self.verified = true;
    }

    /// Runs the pre-comparison checks and consumes one attempt
    ///
    /// Checks, in order: already used, expired, attempts exhausted. When all
    /// pass the attempt counter is incremented; the caller must persist the
    /// challenge before calling [`OtpChallenge::confirm`].
    pub fn record_attempt(&mut self, now: DateTime<Utc>) -> Result<(), OtpError> {
        if self.verified {
            return Err(OtpError::AlreadyUsed);
        }
        if self.is_expired(now) {
            return Err(OtpError::Expired);
        }
        if self.attempts >= MAX_ATTEMPTS {
            return Err(OtpError::TooManyAttempts);
        }

        self.attempts += 1;
        Ok(())
    }

    /// Compares the submitted code and marks the challenge verified on a match
    ///
    /// Call it on the challenge as persisted by the attempt write, which may
    /// show an invalidation that happened after the first read.
    pub fn confirm(&mut self, input_code: &str, now: DateTime<Utc>) -> Result<(), OtpError> {
        if self.verified {
            return Err(OtpError::AlreadyUsed);
        }
        if !constant_time_eq(self.code.as_bytes(), input_code.as_bytes()) {
            return Err(OtpError::CodeMismatch {
                remaining_attempts: self.remaining_attempts(),
            });
        }

        self.verified = true;
        self.verified_at = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(now: DateTime<Utc>) -> OtpChallenge {
        OtpChallenge::issue("+919876543210", DEFAULT_CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, now)
    }

    #[test]
    fn test_issue_generates_code_and_session() {
        let now = Utc::now();
        let c = challenge(now);

        assert_eq!(c.code.len(), DEFAULT_CODE_LENGTH);
        assert!(c.code.chars().all(|ch| ch.is_ascii_digit()));
        assert_eq!(c.session_id.len(), SESSION_ID_LENGTH);
        assert!(c.session_id.chars().all(|ch| ch.is_ascii_alphanumeric()));
        assert_eq!(c.expires_at, now + Duration::minutes(10));
        assert!(!c.verified);
        assert_eq!(c.attempts, 0);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = OtpChallenge::generate_session_id();
        let b = OtpChallenge::generate_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_correct_code_verifies_once() {
        let now = Utc::now();
        let mut c = challenge(now);
        let code = c.code.clone();

        c.record_attempt(now).unwrap();
        c.confirm(&code, now).unwrap();
        assert!(c.verified);
        assert_eq!(c.verified_at, Some(now));

        assert_eq!(c.record_attempt(now), Err(OtpError::AlreadyUsed));
    }

    #[test]
    fn test_wrong_code_reports_remaining_attempts() {
        let now = Utc::now();
        let mut c = challenge(now);

        c.record_attempt(now).unwrap();
        assert_eq!(
            c.confirm("not-it", now),
            Err(OtpError::CodeMismatch { remaining_attempts: 4 })
        );
        assert_eq!(c.attempts, 1);
    }

    #[test]
    fn test_exhausted_after_max_attempts() {
        let now = Utc::now();
        let mut c = challenge(now);

        for _ in 0..MAX_ATTEMPTS {
            c.record_attempt(now).unwrap();
            assert!(c.confirm("xxxxxx", now).is_err());
        }
        assert_eq!(c.remaining_attempts(), 0);
        assert_eq!(c.record_attempt(now), Err(OtpError::TooManyAttempts));
        assert!(!c.verified);
    }

    #[test]
    fn test_expired_wins_over_attempts() {
        let now = Utc::now();
        let mut c = challenge(now);
        c.attempts = MAX_ATTEMPTS;

        let later = now + Duration::minutes(11);
        assert_eq!(c.record_attempt(later), Err(OtpError::Expired));
    }

    #[test]
    fn test_invalidated_challenge_reports_already_used() {
        let now = Utc::now();
        let mut c = challenge(now);
        c.invalidate();

        assert_eq!(c.record_attempt(now), Err(OtpError::AlreadyUsed));
        assert!(c.verified_at.is_none());
    }

    #[test]
    fn test_confirm_rejects_challenge_invalidated_after_attempt() {
        let now = Utc::now();
        let mut c = challenge(now);
        c.record_attempt(now).unwrap();
        c.invalidate();

        let code = c.code.clone();
        assert_eq!(c.confirm(&code, now), Err(OtpError::AlreadyUsed));
        assert!(c.verified_at.is_none());
    }
}
