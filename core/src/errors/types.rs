//! Error types for the OTP engine, the credential bridge and the
//! caller-facing authentication flow.
//!
//! `OtpError` and `BridgeError` describe what went wrong inside a component.
//! `AuthError` is the category the caller sees; the conversions below decide
//! which internal failures surface and which collapse into `Internal`.

use pb_shared::error_codes;
use thiserror::Error;

/// OTP challenge failures, in the order verification checks them
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid session or phone number")]
    NoSuchChallenge,

    #[error("OTP already used")]
    AlreadyUsed,

    #[error("OTP has expired")]
    Expired,

    #[error("Too many attempts. Please request a new OTP")]
    TooManyAttempts,

    #[error("Invalid OTP code. {remaining_attempts} attempts remaining")]
    CodeMismatch { remaining_attempts: u32 },

    #[error("OTP storage failure: {message}")]
    Storage { message: String },
}

/// Credential bridge failures
#[derive(Error, Debug, Clone)]
pub enum BridgeError {
    #[error("Admin API error: {message}")]
    AdminApi { message: String },

    #[error("Failed to create customer: {message}")]
    CustomerCreationFailed { message: String },

    #[error("Failed to create access token: {errors}")]
    TokenExchangeFailed { errors: serde_json::Value },

    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The platform refused the phone field on creation. Consumed by the
    /// single phone-less retry; only escapes if the retry path is bypassed.
    #[error("Phone number rejected by platform: {message}")]
    PhoneRejected { message: String },

    #[error("No stored identity for this phone number")]
    IdentityNotFound,

    #[error("Record store failure: {message}")]
    Storage { message: String },
}

/// Caller-facing authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after_seconds: u64,
    },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Invalid session or phone number")]
    ChallengeNotFound,

    #[error("OTP already used")]
    ChallengeAlreadyUsed,

    #[error("OTP has expired")]
    ChallengeExpired,

    #[error("Too many attempts. Please request a new OTP")]
    ChallengeAttemptsExhausted,

    #[error("Invalid OTP code. {remaining_attempts} attempts remaining")]
    CodeMismatch { remaining_attempts: u32 },

    /// `detail` is the platform's own error text; it is logged, never sent.
    #[error("Failed to authenticate customer: {reason}")]
    BridgeFailed { reason: String, detail: String },

    #[error("Customer not found")]
    CustomerNotFound,

    /// Details stay in the logs; the caller only sees the generic message.
    #[error("Internal server error")]
    Internal { message: String },
}

impl AuthError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::RateLimited { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            AuthError::InvalidInput { .. } => error_codes::INVALID_INPUT,
            AuthError::ChallengeNotFound => error_codes::CHALLENGE_NOT_FOUND,
            AuthError::ChallengeAlreadyUsed => error_codes::CHALLENGE_ALREADY_USED,
            AuthError::ChallengeExpired => error_codes::CHALLENGE_EXPIRED,
            AuthError::ChallengeAttemptsExhausted => error_codes::CHALLENGE_ATTEMPTS_EXHAUSTED,
            AuthError::CodeMismatch { .. } => error_codes::CODE_MISMATCH,
            AuthError::BridgeFailed { .. } => error_codes::BRIDGE_FAILED,
            AuthError::CustomerNotFound => error_codes::CUSTOMER_NOT_FOUND,
            AuthError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<OtpError> for AuthError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::NoSuchChallenge => AuthError::ChallengeNotFound,
            OtpError::AlreadyUsed => AuthError::ChallengeAlreadyUsed,
            OtpError::Expired => AuthError::ChallengeExpired,
            OtpError::TooManyAttempts => AuthError::ChallengeAttemptsExhausted,
            OtpError::CodeMismatch { remaining_attempts } => {
                AuthError::CodeMismatch { remaining_attempts }
            }
            OtpError::Storage { message } => AuthError::Internal { message },
        }
    }
}

impl From<BridgeError> for AuthError {
    fn from(err: BridgeError) -> Self {
        let reason = match &err {
            BridgeError::AdminApi { .. } => "admin API request failed",
            BridgeError::CustomerCreationFailed { .. } => "customer creation failed",
            BridgeError::TokenExchangeFailed { .. } => "storefront token exchange failed",
            BridgeError::Transport { .. } => "commerce platform unreachable",
            BridgeError::IdentityNotFound => return AuthError::CustomerNotFound,
            BridgeError::PhoneRejected { .. } | BridgeError::Storage { .. } => {
                return AuthError::Internal {
                    message: err.to_string(),
                }
            }
        };

        AuthError::BridgeFailed {
            reason: reason.to_string(),
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_errors_map_to_caller_categories() {
        assert_eq!(AuthError::from(OtpError::NoSuchChallenge), AuthError::ChallengeNotFound);
        assert_eq!(AuthError::from(OtpError::AlreadyUsed), AuthError::ChallengeAlreadyUsed);
        assert_eq!(AuthError::from(OtpError::Expired), AuthError::ChallengeExpired);
        assert_eq!(
            AuthError::from(OtpError::TooManyAttempts),
            AuthError::ChallengeAttemptsExhausted
        );
        assert_eq!(
            AuthError::from(OtpError::CodeMismatch { remaining_attempts: 2 }),
            AuthError::CodeMismatch { remaining_attempts: 2 }
        );
        assert!(matches!(
            AuthError::from(OtpError::Storage { message: "db down".into() }),
            AuthError::Internal { .. }
        ));
    }

    #[test]
    fn test_bridge_errors_do_not_leak_payloads() {
        let err = AuthError::from(BridgeError::TokenExchangeFailed {
            errors: serde_json::json!([{"code": "UNIDENTIFIED_CUSTOMER"}]),
        });
        assert_eq!(err.error_code(), error_codes::BRIDGE_FAILED);
        assert!(!err.to_string().contains("UNIDENTIFIED_CUSTOMER"));
        match &err {
            AuthError::BridgeFailed { detail, .. } => assert!(detail.contains("UNIDENTIFIED_CUSTOMER")),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = AuthError::from(BridgeError::Storage { message: "duplicate key".into() });
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.error_code(), error_codes::INTERNAL_ERROR);
    }

    #[test]
    fn test_attempts_exhausted_has_its_own_code() {
        assert_ne!(
            AuthError::ChallengeAttemptsExhausted.error_code(),
            AuthError::RateLimited { message: String::new(), retry_after_seconds: 1 }.error_code()
        );
    }

    #[test]
    fn test_code_mismatch_message() {
        let err = OtpError::CodeMismatch { remaining_attempts: 4 };
        assert_eq!(err.to_string(), "Invalid OTP code. 4 attempts remaining");
    }
}
