//! Types for authentication flow results

use chrono::{DateTime, Utc};

use crate::domain::value_objects::CustomerProfile;
use crate::services::verification::DeliveryStatus;

/// Result of a send-otp request
#[derive(Debug, Clone)]
pub struct SendOtpResult {
    /// Session id to present on verification
    pub session_id: String,
    /// Operator-facing status message
    pub message: String,
    /// SMS delivery outcome
    pub delivery: DeliveryStatus,
    /// When the code expires
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful verify-otp request
#[derive(Debug, Clone)]
pub struct VerifyOtpResult {
    /// Public customer fields
    pub customer: CustomerProfile,
    /// Platform customer access token
    pub access_token: String,
    /// Platform expiry string for the token
    pub expires_at: String,
}
