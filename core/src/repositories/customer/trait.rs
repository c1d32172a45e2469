//! Customer identity repository trait defining the interface for identity
//! persistence.

use async_trait::async_trait;

use crate::domain::entities::CustomerIdentity;
use crate::errors::DomainError;

/// Repository trait for CustomerIdentity persistence operations
///
/// Implementations must enforce uniqueness of the phone number, the
/// platform customer id and the hidden email.
#[async_trait]
pub trait CustomerIdentityRepository: Send + Sync {
    /// Find an identity by phone number
    ///
    /// # Returns
    /// * `Ok(Some(CustomerIdentity))` - Identity found
    /// * `Ok(None)` - No identity for this phone
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerIdentity>, DomainError>;

    /// Store a new identity
    ///
    /// # Returns
    /// * `Ok(CustomerIdentity)` - The stored identity
    /// * `Err(DomainError::Conflict)` - One of the unique keys is already taken
    async fn create(&self, identity: CustomerIdentity) -> Result<CustomerIdentity, DomainError>;

    /// Update name fields, active flag or hidden password
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - The identity was never stored
    async fn update(&self, identity: CustomerIdentity) -> Result<CustomerIdentity, DomainError>;
}
