//! Unit tests for the credential bridge

use std::sync::Arc;
use std::time::Duration;

use crate::errors::BridgeError;
use crate::repositories::{CustomerIdentityRepository, InMemoryCustomerIdentityRepository};
use crate::services::bridge::{BridgeConfig, CredentialBridge, PlatformCustomer};

use super::mocks::{Accounts, MockAdminApi, MockStorefrontApi};

const PHONE: &str = "+919876543210";

type Bridge = CredentialBridge<InMemoryCustomerIdentityRepository, MockAdminApi, MockStorefrontApi>;

fn accounts() -> Accounts {
    Arc::new(std::sync::Mutex::new(std::collections::HashMap::new()))
}

fn bridge_with(
    admin: MockAdminApi,
    storefront: MockStorefrontApi,
    config: BridgeConfig,
) -> (Bridge, Arc<InMemoryCustomerIdentityRepository>, Arc<MockAdminApi>, Arc<MockStorefrontApi>) {
    let repo = Arc::new(InMemoryCustomerIdentityRepository::new());
    let admin = Arc::new(admin);
    let storefront = Arc::new(storefront);
    let bridge = CredentialBridge::new(repo.clone(), admin.clone(), storefront.clone(), config);
    (bridge, repo, admin, storefront)
}

fn default_bridge() -> (Bridge, Arc<InMemoryCustomerIdentityRepository>, Arc<MockAdminApi>, Arc<MockStorefrontApi>) {
    let accounts = accounts();
    bridge_with(
        MockAdminApi::new(accounts.clone()),
        MockStorefrontApi::new(accounts),
        BridgeConfig::default(),
    )
}

#[tokio::test]
async fn test_first_bridge_creates_customer_and_identity() {
    let (bridge, repo, admin, _storefront) = default_bridge();

    let outcome = bridge.bridge(PHONE).await.unwrap();

    assert_eq!(admin.create_count(), 1);
    assert_eq!(repo.len().await, 1);
    assert_eq!(outcome.identity.hidden_email, "customer.919876543210@phonebridge.internal");
    assert_eq!(outcome.identity.hidden_password.len(), 16);
    assert_eq!(outcome.access_token, "token-for-customer.919876543210@phonebridge.internal");
    assert_eq!(outcome.expires_at, "2026-11-15T10:00:00Z");
    assert!(outcome.preexisting_platform_customer.is_none());

    let created = admin.create_calls.lock().unwrap()[0].clone();
    assert_eq!(created.phone.as_deref(), Some(PHONE));
}

#[tokio::test]
async fn test_second_bridge_reuses_stored_credentials() {
    let (bridge, repo, admin, storefront) = default_bridge();

    let first = bridge.bridge(PHONE).await.unwrap();
    let second = bridge.bridge(PHONE).await.unwrap();

    assert_eq!(admin.create_count(), 1);
    assert_eq!(repo.len().await, 1);
    assert_eq!(first.identity.id, second.identity.id);
    assert_eq!(storefront.exchanges.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_phone_rejection_retries_once_without_phone() {
    let accounts = accounts();
    let mut admin = MockAdminApi::new(accounts.clone());
    admin.reject_phone = true;
    let (bridge, repo, admin, _) =
        bridge_with(admin, MockStorefrontApi::new(accounts), BridgeConfig::default());

    let outcome = bridge.bridge(PHONE).await.unwrap();

    let calls = admin.create_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].phone.is_some());
    assert!(calls[1].phone.is_none());
    assert_eq!(calls[0].password, calls[1].password);
    assert_eq!(outcome.identity.phone, PHONE);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_existing_platform_customer_is_flagged_not_reused() {
    let accounts = accounts();
    let mut admin = MockAdminApi::new(accounts.clone());
    admin.existing_by_phone = Some(PlatformCustomer {
        id: "gid://shopify/Customer/1".to_string(),
        email: Some("someone@example.com".to_string()),
        phone: Some(PHONE.to_string()),
        first_name: Some("Asha".to_string()),
        last_name: None,
    });
    let (bridge, _repo, admin, _) =
        bridge_with(admin, MockStorefrontApi::new(accounts), BridgeConfig::default());

    let outcome = bridge.bridge(PHONE).await.unwrap();

    assert_eq!(
        outcome.preexisting_platform_customer.as_deref(),
        Some("gid://shopify/Customer/1")
    );
    assert_ne!(outcome.identity.platform_customer_id, "gid://shopify/Customer/1");
    assert_eq!(admin.create_count(), 1);
}

#[tokio::test]
async fn test_token_failure_keeps_persisted_identity() {
    let accounts = accounts();
    let mut storefront = MockStorefrontApi::new(accounts.clone());
    storefront.force_user_errors = true;
    let (bridge, repo, admin, _) =
        bridge_with(MockAdminApi::new(accounts), storefront, BridgeConfig::default());

    let err = bridge.bridge(PHONE).await.unwrap_err();
    match err {
        BridgeError::TokenExchangeFailed { errors } => {
            assert_eq!(errors[0]["code"], "UNIDENTIFIED_CUSTOMER");
        }
        other => panic!("Expected TokenExchangeFailed, got {:?}", other),
    }

    // The identity was stored before the exchange, so a retry will not create again
    assert_eq!(repo.len().await, 1);
    assert_eq!(admin.create_count(), 1);
    let _ = bridge.bridge(PHONE).await;
    assert_eq!(admin.create_count(), 1);
}

#[tokio::test]
async fn test_creation_failure_persists_nothing() {
    let accounts = accounts();
    let mut admin = MockAdminApi::new(accounts.clone());
    admin.fail_create = true;
    let (bridge, repo, _, _) =
        bridge_with(admin, MockStorefrontApi::new(accounts), BridgeConfig::default());

    let err = bridge.bridge(PHONE).await.unwrap_err();
    assert!(matches!(err, BridgeError::CustomerCreationFailed { .. }));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_transport_failure_on_probe_stops_before_creation() {
    let accounts = accounts();
    let mut admin = MockAdminApi::new(accounts.clone());
    admin.unreachable = true;
    let (bridge, repo, admin, _) =
        bridge_with(admin, MockStorefrontApi::new(accounts), BridgeConfig::default());

    let err = bridge.bridge(PHONE).await.unwrap_err();
    assert!(matches!(err, BridgeError::Transport { .. }));
    assert_eq!(admin.create_count(), 0);
    assert!(repo.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_first_logins_race_to_duplicate_creation() {
    let accounts = accounts();
    let config = BridgeConfig {
        creation_delay: Some(Duration::from_millis(50)),
        ..BridgeConfig::default()
    };
    let (bridge, repo, admin, _) = bridge_with(
        MockAdminApi::new(accounts.clone()),
        MockStorefrontApi::new(accounts),
        config,
    );

    let (a, b) = tokio::join!(bridge.bridge(PHONE), bridge.bridge(PHONE));

    // Both requests passed the local lookup before either persisted
    assert_eq!(admin.create_count(), 2);
    assert_eq!(repo.len().await, 1);

    let failures: Vec<_> = [a, b].into_iter().filter_map(Result::err).collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], BridgeError::Storage { .. }));
}

#[tokio::test]
async fn test_rotate_password_updates_platform_then_local() {
    let (bridge, repo, admin, _) = default_bridge();
    let original = bridge.bridge(PHONE).await.unwrap().identity;

    let rotated = bridge.rotate_password(PHONE).await.unwrap();

    assert_ne!(rotated.hidden_password, original.hidden_password);
    let updates = admin.password_updates.lock().unwrap().clone();
    assert_eq!(updates, vec![(original.platform_customer_id.clone(), rotated.hidden_password.clone())]);

    let stored = repo.find_by_phone(PHONE).await.unwrap().unwrap();
    assert_eq!(stored.hidden_password, rotated.hidden_password);

    // Login still works with the new password
    assert!(bridge.bridge(PHONE).await.is_ok());
}

#[tokio::test]
async fn test_rotate_password_for_unknown_phone() {
    let (bridge, _, admin, _) = default_bridge();
    let err = bridge.rotate_password(PHONE).await.unwrap_err();
    assert!(matches!(err, BridgeError::IdentityNotFound));
    assert!(admin.password_updates.lock().unwrap().is_empty());
}
