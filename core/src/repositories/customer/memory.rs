//! In-memory customer identity store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::CustomerIdentity;
use crate::errors::DomainError;

use super::trait_::CustomerIdentityRepository;

/// Identity store for tests and single-process runs
#[derive(Clone, Default)]
pub struct InMemoryCustomerIdentityRepository {
    identities: Arc<RwLock<HashMap<Uuid, CustomerIdentity>>>,
}

impl InMemoryCustomerIdentityRepository {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `identity`
    pub fn with_identity(identity: CustomerIdentity) -> Self {
        let mut map = HashMap::new();
        map.insert(identity.id, identity);
        Self {
            identities: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerIdentityRepository for InMemoryCustomerIdentityRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerIdentity>, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities.values().find(|i| i.phone == phone).cloned())
    }

    async fn create(&self, identity: CustomerIdentity) -> Result<CustomerIdentity, DomainError> {
        let mut identities = self.identities.write().await;

        let duplicate = identities.values().find_map(|existing| {
            if existing.phone == identity.phone {
                Some("phone")
            } else if existing.platform_customer_id == identity.platform_customer_id {
                Some("platform_customer_id")
            } else if existing.hidden_email == identity.hidden_email {
                Some("hidden_email")
            } else {
                None
            }
        });
        if let Some(field) = duplicate {
            return Err(DomainError::Conflict {
                message: format!("Customer identity with this {} already exists", field),
            });
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn update(&self, identity: CustomerIdentity) -> Result<CustomerIdentity, DomainError> {
        let mut identities = self.identities.write().await;

        if !identities.contains_key(&identity.id) {
            return Err(DomainError::NotFound {
                resource: "CustomerIdentity".to_string(),
            });
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }
}
