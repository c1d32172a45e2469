//! Credential bridge implementation

use std::sync::Arc;

use pb_shared::phone::mask_phone_number;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::CustomerIdentity;
use crate::domain::value_objects::{derive_hidden_email, generate_hidden_password};
use crate::errors::{BridgeError, DomainError};
use crate::repositories::CustomerIdentityRepository;

use super::config::BridgeConfig;
use super::traits::{CommerceAdminApi, StorefrontApi};
use super::types::{BridgeOutcome, NewPlatformCustomer, PlatformCustomer};

/// Find-or-create-and-exchange protocol against the commerce platform
pub struct CredentialBridge<C, A, F>
where
    C: CustomerIdentityRepository,
    A: CommerceAdminApi,
    F: StorefrontApi,
{
    /// Local identity store
    identities: Arc<C>,
    /// Platform admin surface
    admin: Arc<A>,
    /// Platform storefront surface
    storefront: Arc<F>,
    /// Time source for identity timestamps
    clock: Arc<dyn Clock>,
    /// Bridge configuration
    config: BridgeConfig,
}

fn storage_error(err: DomainError) -> BridgeError {
    BridgeError::Storage {
        message: err.to_string(),
    }
}

impl<C, A, F> CredentialBridge<C, A, F>
where
    C: CustomerIdentityRepository,
    A: CommerceAdminApi,
    F: StorefrontApi,
{
    /// Create a new credential bridge
    ///
    /// # Arguments
    ///
    /// * `identities` - Local identity repository
    /// * `admin` - Admin API client
    /// * `storefront` - Storefront API client
    /// * `config` - Bridge configuration
    pub fn new(identities: Arc<C>, admin: Arc<A>, storefront: Arc<F>, config: BridgeConfig) -> Self {
        Self {
            identities,
            admin,
            storefront,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Look up the stored identity for a phone
    pub async fn find_identity(&self, phone: &str) -> Result<Option<CustomerIdentity>, BridgeError> {
        self.identities.find_by_phone(phone).await.map_err(storage_error)
    }

    /// Obtain a platform access token for a verified phone number
    ///
    /// Steps:
    /// 1. Reuse the stored identity if the phone is known locally
    /// 2. Otherwise probe the platform for an existing customer (reported only)
    /// 3. Create the platform customer with a hidden email and password,
    ///    retrying once without the phone if the platform rejects it, and
    ///    persist the identity right away
    /// 4. Exchange the hidden credentials for an access token
    ///
    /// Calling again for a persisted identity creates nothing new.
    pub async fn bridge(&self, phone: &str) -> Result<BridgeOutcome, BridgeError> {
        let masked = mask_phone_number(phone);

        let (identity, preexisting_platform_customer) = match self.find_identity(phone).await? {
            Some(identity) => {
                tracing::info!(phone = %masked, event = "bridge_identity_found", "Reusing stored customer identity");
                (identity, None)
            }
            None => self.provision(phone).await?,
        };

        let token = self
            .storefront
            .create_customer_access_token(&identity.hidden_email, &identity.hidden_password)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "bridge_token_exchange_failed",
                    "Storefront token exchange failed"
                );
                e
            })?;

        tracing::info!(phone = %masked, event = "bridge_token_issued", "Customer access token issued");

        Ok(BridgeOutcome {
            identity,
            access_token: token.access_token,
            expires_at: token.expires_at,
            preexisting_platform_customer,
        })
    }

    /// Create the platform customer and the local identity for a new phone
    async fn provision(
        &self,
        phone: &str,
    ) -> Result<(CustomerIdentity, Option<String>), BridgeError> {
        let masked = mask_phone_number(phone);

        let preexisting = self
            .admin
            .find_customer_by_phone(phone)
            .await?
            .map(|customer| customer.id);
        if let Some(existing_id) = &preexisting {
            // Its password is unknown, so it cannot be used for the exchange
            tracing::warn!(
                phone = %masked,
                platform_customer_id = %existing_id,
                event = "bridge_unlinked_platform_customer",
                "Platform customer exists without a local identity; creating a new one"
            );
        }

        if let Some(delay) = self.config.creation_delay {
            tokio::time::sleep(delay).await;
        }

        let hidden_email = derive_hidden_email(phone, &self.config.hidden_email_domain);
        let hidden_password = generate_hidden_password(self.config.password_length);

        let created = self
            .create_platform_customer(NewPlatformCustomer {
                email: hidden_email.clone(),
                password: hidden_password.clone(),
                phone: Some(phone.to_string()),
            })
            .await?;

        let identity = CustomerIdentity::new(
            phone,
            created.id.clone(),
            hidden_email,
            hidden_password,
            self.clock.now(),
        )
        .with_name(created.first_name, created.last_name);

        let identity = self.identities.create(identity).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                platform_customer_id = %created.id,
                error = %e,
                event = "bridge_identity_persist_failed",
                "Platform customer created but local identity could not be stored"
            );
            storage_error(e)
        })?;

        tracing::info!(
            phone = %masked,
            platform_customer_id = %identity.platform_customer_id,
            event = "bridge_customer_created",
            "Created platform customer with hidden credentials"
        );

        Ok((identity, preexisting))
    }

    /// Create on the admin surface, dropping the phone once if it is rejected
    async fn create_platform_customer(
        &self,
        mut customer: NewPlatformCustomer,
    ) -> Result<PlatformCustomer, BridgeError> {
        match self.admin.create_customer(&customer).await {
            Err(BridgeError::PhoneRejected { message }) if customer.phone.is_some() => {
                tracing::warn!(
                    reason = %message,
                    event = "bridge_phone_rejected",
                    "Platform rejected phone field; retrying without it"
                );
                customer.phone = None;
                self.admin.create_customer(&customer).await
            }
            other => other,
        }
    }

    /// Replace the hidden password of a known customer
    ///
    /// The new password is set on the platform first and stored locally only
    /// once the platform accepted it.
    pub async fn rotate_password(&self, phone: &str) -> Result<CustomerIdentity, BridgeError> {
        let masked = mask_phone_number(phone);
        let mut identity = self
            .find_identity(phone)
            .await?
            .ok_or(BridgeError::IdentityNotFound)?;

        let new_password = generate_hidden_password(self.config.password_length);
        self.admin
            .update_customer_password(&identity.platform_customer_id, &new_password)
            .await?;

        identity.rotate_password(new_password, self.clock.now());
        let identity = self.identities.update(identity).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "bridge_password_persist_failed",
                "Platform password changed but local copy could not be stored"
            );
            storage_error(e)
        })?;

        tracing::info!(phone = %masked, event = "bridge_password_rotated", "Hidden password rotated");
        Ok(identity)
    }
}
