//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Whether the SMS carrying the code reached the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Provider accepted the message
    Delivered { message_id: String },
    /// Provider failed; the challenge is still valid
    Degraded { reason: String },
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered { .. })
    }
}

/// Result of issuing a challenge
#[derive(Clone)]
pub struct IssuedChallenge {
    /// Session id the caller must present on verification
    pub session_id: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// SMS delivery outcome
    pub delivery: DeliveryStatus,
    /// The code itself, for operator status on degraded delivery only
    pub code: String,
}

impl std::fmt::Debug for IssuedChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedChallenge")
            .field("session_id", &self.session_id)
            .field("expires_at", &self.expires_at)
            .field("delivery", &self.delivery)
            .field("code", &"<redacted>")
            .finish()
    }
}
