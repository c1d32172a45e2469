use chrono::Utc;

use crate::domain::entities::CustomerIdentity;
use crate::errors::DomainError;
use crate::repositories::customer::{CustomerIdentityRepository, InMemoryCustomerIdentityRepository};

fn identity(phone: &str, platform_id: &str) -> CustomerIdentity {
    let digits = phone.trim_start_matches('+');
    CustomerIdentity::new(
        phone,
        platform_id,
        format!("customer.{}@phonebridge.internal", digits),
        "hidden-password",
        Utc::now(),
    )
}

#[tokio::test]
async fn test_create_and_find_by_phone() {
    let repo = InMemoryCustomerIdentityRepository::new();
    let created = repo
        .create(identity("+919876543210", "gid://shopify/Customer/1"))
        .await
        .unwrap();

    let found = repo.find_by_phone("+919876543210").await.unwrap();
    assert_eq!(found, Some(created));
    assert!(repo.find_by_phone("+919876543211").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_phone_is_rejected() {
    let repo = InMemoryCustomerIdentityRepository::new();
    repo.create(identity("+919876543210", "gid://shopify/Customer/1")).await.unwrap();

    let result = repo.create(identity("+919876543210", "gid://shopify/Customer/2")).await;
    match result {
        Err(DomainError::Conflict { message }) => assert!(message.contains("phone")),
        other => panic!("Expected conflict, got {:?}", other),
    }
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_duplicate_platform_id_is_rejected() {
    let repo = InMemoryCustomerIdentityRepository::new();
    repo.create(identity("+919876543210", "gid://shopify/Customer/1")).await.unwrap();

    let result = repo.create(identity("+14155550100", "gid://shopify/Customer/1")).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_update_persists_password_rotation() {
    let repo = InMemoryCustomerIdentityRepository::new();
    let mut stored = repo
        .create(identity("+919876543210", "gid://shopify/Customer/1"))
        .await
        .unwrap();

    stored.rotate_password("rotated", Utc::now());
    repo.update(stored).await.unwrap();

    let found = repo.find_by_phone("+919876543210").await.unwrap().unwrap();
    assert_eq!(found.hidden_password, "rotated");
}

#[tokio::test]
async fn test_update_unknown_identity_fails() {
    let repo = InMemoryCustomerIdentityRepository::new();
    let result = repo.update(identity("+919876543210", "gid://shopify/Customer/1")).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
