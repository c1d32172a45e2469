//! Types exchanged with the commerce platform and returned by the bridge

use serde::{Deserialize, Serialize};

use crate::domain::entities::CustomerIdentity;

/// A customer as the platform reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCustomer {
    /// Global id, e.g. `gid://shopify/Customer/123`
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Creation request for a platform customer
#[derive(Clone, PartialEq, Eq)]
pub struct NewPlatformCustomer {
    pub email: String,
    pub password: String,
    /// Dropped on the retry after the platform rejects it
    pub phone: Option<String>,
}

impl std::fmt::Debug for NewPlatformCustomer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewPlatformCustomer")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phone", &self.phone)
            .finish()
    }
}

/// Token minted by the storefront API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAccessToken {
    pub access_token: String,
    /// Platform expiry string, passed through unmodified
    pub expires_at: String,
}

/// Result of a successful bridge
#[derive(Debug, Clone)]
pub struct BridgeOutcome {
    /// The local identity used for the exchange
    pub identity: CustomerIdentity,
    /// Platform customer access token
    pub access_token: String,
    /// Platform expiry string for the token
    pub expires_at: String,
    /// Set when the platform already had a customer with this phone that the
    /// local store did not know about; a second account was created anyway
    pub preexisting_platform_customer: Option<String>,
}
