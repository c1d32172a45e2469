//! Shared wiring for the HTTP tests: in-memory stores, a recording SMS
//! transport and a fake commerce platform.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;

use pb_api::app::AppState;
use pb_core::errors::BridgeError;
use pb_core::repositories::{InMemoryCustomerIdentityRepository, InMemoryOtpChallengeRepository};
use pb_core::services::auth::{AuthService, AuthServiceConfig};
use pb_core::services::bridge::{
    BridgeConfig, CommerceAdminApi, CredentialBridge, CustomerAccessToken, NewPlatformCustomer,
    PlatformCustomer, StorefrontApi,
};
use pb_core::services::rate_limit::SlidingWindowRateLimiter;
use pb_core::services::verification::{OtpService, OtpServiceConfig, SmsServiceTrait};
use pb_shared::RateLimitPolicy;

pub const PHONE: &str = "+919876543210";

#[derive(Default)]
pub struct RecordingSms {
    bodies: Mutex<HashMap<String, String>>,
}

impl RecordingSms {
    /// The six-digit code in the last message sent to `phone`
    pub fn code_for(&self, phone: &str) -> Option<String> {
        let bodies = self.bodies.lock().unwrap();
        bodies
            .get(phone)?
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| part.len() == 6)
            .map(str::to_string)
    }
}

#[async_trait]
impl SmsServiceTrait for RecordingSms {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String> {
        self.bodies.lock().unwrap().insert(to.to_string(), body.to_string());
        Ok("SM-test".to_string())
    }
}

#[derive(Default)]
pub struct FakePlatform {
    passwords: Mutex<HashMap<String, String>>,
    created: AtomicU64,
}

impl FakePlatform {
    pub fn created(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommerceAdminApi for FakePlatform {
    async fn find_customer_by_phone(&self, _phone: &str) -> Result<Option<PlatformCustomer>, BridgeError> {
        Ok(None)
    }

    async fn create_customer(&self, customer: &NewPlatformCustomer) -> Result<PlatformCustomer, BridgeError> {
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        self.passwords
            .lock()
            .unwrap()
            .insert(customer.email.clone(), customer.password.clone());
        Ok(PlatformCustomer {
            id: format!("gid://shopify/Customer/{}", 1000 + n),
            email: Some(customer.email.clone()),
            phone: customer.phone.clone(),
            first_name: None,
            last_name: None,
        })
    }

    async fn update_customer_password(&self, _id: &str, _password: &str) -> Result<(), BridgeError> {
        Ok(())
    }
}

#[async_trait]
impl StorefrontApi for FakePlatform {
    async fn create_customer_access_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerAccessToken, BridgeError> {
        let passwords = self.passwords.lock().unwrap();
        if passwords.get(email).map(String::as_str) == Some(password) {
            Ok(CustomerAccessToken {
                access_token: format!("token-for-{}", email),
                expires_at: "2026-11-15T10:00:00Z".to_string(),
            })
        } else {
            Err(BridgeError::TokenExchangeFailed {
                errors: serde_json::json!([{"code": "UNIDENTIFIED_CUSTOMER"}]),
            })
        }
    }
}

pub type TestState = AppState<
    InMemoryOtpChallengeRepository,
    RecordingSms,
    InMemoryCustomerIdentityRepository,
    FakePlatform,
    FakePlatform,
>;

pub struct Harness {
    pub state: web::Data<TestState>,
    pub sms: Arc<RecordingSms>,
    pub platform: Arc<FakePlatform>,
}

pub fn harness() -> Harness {
    harness_with_issue_limit(RateLimitPolicy::new(5, 3600))
}

pub fn harness_with_issue_limit(issue: RateLimitPolicy) -> Harness {
    let sms = Arc::new(RecordingSms::default());
    let platform = Arc::new(FakePlatform::default());

    let otp = Arc::new(OtpService::new(
        Arc::new(InMemoryOtpChallengeRepository::new()),
        sms.clone(),
        OtpServiceConfig::default(),
    ));
    let bridge = Arc::new(CredentialBridge::new(
        Arc::new(InMemoryCustomerIdentityRepository::new()),
        platform.clone(),
        platform.clone(),
        BridgeConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        otp,
        bridge,
        Arc::new(SlidingWindowRateLimiter::new(issue)),
        Arc::new(SlidingWindowRateLimiter::new(RateLimitPolicy::new(10, 600))),
        AuthServiceConfig::default(),
    ));

    Harness {
        state: web::Data::new(AppState {
            auth_service,
            commerce_configured: true,
        }),
        sms,
        platform,
    }
}

/// Build the service under test from a harness
macro_rules! test_app {
    ($harness:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($harness.state.clone())
                .configure(
                    pb_api::app::configure::<
                        pb_core::repositories::InMemoryOtpChallengeRepository,
                        common::RecordingSms,
                        pb_core::repositories::InMemoryCustomerIdentityRepository,
                        common::FakePlatform,
                        common::FakePlatform,
                    >,
                ),
        )
        .await
    };
}
