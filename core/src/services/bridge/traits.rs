//! Traits for the two commerce platform surfaces

use async_trait::async_trait;

use crate::errors::BridgeError;

use super::types::{CustomerAccessToken, NewPlatformCustomer, PlatformCustomer};

/// Administrative API: can create customers and set passwords, never read them
#[async_trait]
pub trait CommerceAdminApi: Send + Sync {
    /// Look up an existing platform customer by phone
    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<PlatformCustomer>, BridgeError>;

    /// Create a customer with the given hidden credentials
    ///
    /// Must return [`BridgeError::PhoneRejected`] when the platform refuses
    /// the phone field specifically, so the caller can retry without it.
    async fn create_customer(
        &self,
        customer: &NewPlatformCustomer,
    ) -> Result<PlatformCustomer, BridgeError>;

    /// Replace the password of an existing customer
    async fn update_customer_password(
        &self,
        platform_customer_id: &str,
        password: &str,
    ) -> Result<(), BridgeError>;
}

/// Customer-facing API: validates credentials and mints access tokens
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Exchange email and password for a customer access token
    async fn create_customer_access_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerAccessToken, BridgeError>;
}
