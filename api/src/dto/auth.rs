use serde::{Deserialize, Serialize};
use validator::Validate;

use pb_core::domain::value_objects::CustomerProfile;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Phone number with country code, e.g. "+919876543210"; a bare
    /// 10-digit number gets the configured default country code
    #[validate(length(min = 10, max = 24, message = "Phone number is required"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 10, max = 24, message = "Phone number is required"))]
    pub phone: String,

    /// The code received by SMS
    #[validate(length(min = 1, max = 10, message = "OTP is required"))]
    pub otp: String,

    /// Session id returned by send-otp
    #[validate(length(min = 1, max = 64, message = "session_id is required"))]
    pub session_id: String,
}

/// Customer fields returned after login and by the profile lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerData {
    pub id: String,
    pub phone: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub shopify_customer_id: String,
}

impl From<CustomerProfile> for CustomerData {
    fn from(profile: CustomerProfile) -> Self {
        Self {
            id: profile.id,
            phone: profile.phone,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            shopify_customer_id: profile.platform_customer_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub customer: Option<CustomerData>,
    /// Storefront customer access token
    pub access_token: Option<String>,
    pub token_expires_at: Option<String>,
}
