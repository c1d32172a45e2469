//! Customer identity: the local record that ties a phone number to a
//! storefront customer account and the hidden credentials used to log into it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::CustomerProfile;

/// Local mapping between a phone number and a platform customer
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerIdentity {
    /// Unique identifier for the local record
    pub id: Uuid,

    /// Phone number (E.164), unique
    pub phone: String,

    /// Platform customer id (`gid://shopify/Customer/...`), unique
    pub platform_customer_id: String,

    /// Hidden email derived from the phone, unique
    pub hidden_email: String,

    /// Hidden password known to the platform; never returned to callers
    #[serde(skip_serializing, default)]
    pub hidden_password: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Whether the identity may be used for login
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerIdentity {
    /// Creates a new active identity
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number the identity belongs to
    /// * `platform_customer_id` - Id returned by the platform on creation
    /// * `hidden_email` - Derived email the platform account was created with
    /// * `hidden_password` - Generated password the platform account was created with
    /// * `now` - Creation time
    pub fn new(
        phone: impl Into<String>,
        platform_customer_id: impl Into<String>,
        hidden_email: impl Into<String>,
        hidden_password: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            platform_customer_id: platform_customer_id.into(),
            hidden_email: hidden_email.into(),
            hidden_password: hidden_password.into(),
            first_name: None,
            last_name: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the optional name fields
    pub fn with_name(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Replaces the hidden password after it was changed on the platform
    pub fn rotate_password(&mut self, new_password: impl Into<String>, now: DateTime<Utc>) {
        self.hidden_password = new_password.into();
        self.updated_at = now;
    }

    /// Public view without credentials
    pub fn profile(&self) -> CustomerProfile {
        CustomerProfile {
            id: self.id.to_string(),
            phone: self.phone.clone(),
            email: Some(self.hidden_email.clone()),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            platform_customer_id: self.platform_customer_id.clone(),
        }
    }
}

impl std::fmt::Debug for CustomerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerIdentity")
            .field("id", &self.id)
            .field("phone", &self.phone)
            .field("platform_customer_id", &self.platform_customer_id)
            .field("hidden_email", &self.hidden_email)
            .field("hidden_password", &"<redacted>")
            .field("is_active", &self.is_active)
            .finish()
    }
}
