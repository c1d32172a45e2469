use actix_web::{web, HttpResponse};

use pb_core::repositories::{CustomerIdentityRepository, OtpChallengeRepository};
use pb_core::services::bridge::{CommerceAdminApi, StorefrontApi};
use pb_core::services::verification::SmsServiceTrait;

use crate::app::AppState;

/// Service root
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "PhoneBridge API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "description": "Phone OTP login bridged onto storefront customer accounts",
    }))
}

/// Overall health, including whether the commerce credentials are configured
pub async fn health<R, S, C, A, F>(state: web::Data<AppState<R, S, C, A, F>>) -> HttpResponse
where
    R: OtpChallengeRepository + 'static,
    S: SmsServiceTrait + 'static,
    C: CustomerIdentityRepository + 'static,
    A: CommerceAdminApi + 'static,
    F: StorefrontApi + 'static,
{
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "shopify_configured": state.commerce_configured,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
