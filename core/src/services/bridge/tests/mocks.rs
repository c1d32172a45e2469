//! Mock commerce platform for testing the credential bridge
//!
//! Both mocks share one account table so the storefront mock only mints a
//! token for credentials the admin mock actually created.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::BridgeError;
use crate::services::bridge::{
    CommerceAdminApi, CustomerAccessToken, NewPlatformCustomer, PlatformCustomer, StorefrontApi,
};

/// email -> (customer id, password)
pub type Accounts = Arc<Mutex<HashMap<String, (String, String)>>>;

pub struct MockAdminApi {
    pub accounts: Accounts,
    pub create_calls: Arc<Mutex<Vec<NewPlatformCustomer>>>,
    pub password_updates: Arc<Mutex<Vec<(String, String)>>>,
    pub existing_by_phone: Option<PlatformCustomer>,
    pub reject_phone: bool,
    pub fail_create: bool,
    pub unreachable: bool,
    next_id: AtomicU64,
}

impl MockAdminApi {
    pub fn new(accounts: Accounts) -> Self {
        Self {
            accounts,
            create_calls: Arc::new(Mutex::new(Vec::new())),
            password_updates: Arc::new(Mutex::new(Vec::new())),
            existing_by_phone: None,
            reject_phone: false,
            fail_create: false,
            unreachable: false,
            next_id: AtomicU64::new(1000),
        }
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CommerceAdminApi for MockAdminApi {
    async fn find_customer_by_phone(
        &self,
        _phone: &str,
    ) -> Result<Option<PlatformCustomer>, BridgeError> {
        if self.unreachable {
            return Err(BridgeError::Transport {
                message: "connection refused".to_string(),
            });
        }
        Ok(self.existing_by_phone.clone())
    }

    async fn create_customer(
        &self,
        customer: &NewPlatformCustomer,
    ) -> Result<PlatformCustomer, BridgeError> {
        self.create_calls.lock().unwrap().push(customer.clone());

        if self.fail_create {
            return Err(BridgeError::CustomerCreationFailed {
                message: "{\"errors\":{\"email\":[\"is invalid\"]}}".to_string(),
            });
        }
        if self.reject_phone && customer.phone.is_some() {
            return Err(BridgeError::PhoneRejected {
                message: "phone is invalid".to_string(),
            });
        }

        let id = format!("gid://shopify/Customer/{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.accounts
            .lock()
            .unwrap()
            .insert(customer.email.clone(), (id.clone(), customer.password.clone()));

        Ok(PlatformCustomer {
            id,
            email: Some(customer.email.clone()),
            phone: customer.phone.clone(),
            first_name: None,
            last_name: None,
        })
    }

    async fn update_customer_password(
        &self,
        platform_customer_id: &str,
        password: &str,
    ) -> Result<(), BridgeError> {
        self.password_updates
            .lock()
            .unwrap()
            .push((platform_customer_id.to_string(), password.to_string()));

        let mut accounts = self.accounts.lock().unwrap();
        let entry = accounts
            .values_mut()
            .find(|(id, _)| id == platform_customer_id)
            .ok_or_else(|| BridgeError::AdminApi {
                message: "Not Found".to_string(),
            })?;
        entry.1 = password.to_string();
        Ok(())
    }
}

pub struct MockStorefrontApi {
    pub accounts: Accounts,
    pub exchanges: Arc<Mutex<Vec<String>>>,
    pub force_user_errors: bool,
}

impl MockStorefrontApi {
    pub fn new(accounts: Accounts) -> Self {
        Self {
            accounts,
            exchanges: Arc::new(Mutex::new(Vec::new())),
            force_user_errors: false,
        }
    }
}

#[async_trait]
impl StorefrontApi for MockStorefrontApi {
    async fn create_customer_access_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerAccessToken, BridgeError> {
        self.exchanges.lock().unwrap().push(email.to_string());

        let valid = self
            .accounts
            .lock()
            .unwrap()
            .get(email)
            .is_some_and(|(_, stored)| stored == password);

        if self.force_user_errors || !valid {
            return Err(BridgeError::TokenExchangeFailed {
                errors: serde_json::json!([{
                    "code": "UNIDENTIFIED_CUSTOMER",
                    "field": null,
                    "message": "Unidentified customer"
                }]),
            });
        }

        Ok(CustomerAccessToken {
            access_token: format!("token-for-{}", email),
            expires_at: "2026-11-15T10:00:00Z".to_string(),
        })
    }
}
