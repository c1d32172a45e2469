//! Domain entities representing core business objects.

pub mod customer_identity;
pub mod otp_challenge;

// Re-export commonly used types
pub use customer_identity::CustomerIdentity;
pub use otp_challenge::{
    OtpChallenge, DEFAULT_CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, SESSION_ID_LENGTH,
};
