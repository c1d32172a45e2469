//! Application state and route table
//!
//! Handlers are generic over the collaborator implementations, so the binary
//! plugs in MySQL, Twilio and Shopify while tests plug in in-memory stores and
//! fakes.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use pb_core::repositories::{CustomerIdentityRepository, OtpChallengeRepository};
use pb_core::services::auth::AuthService;
use pb_core::services::bridge::{CommerceAdminApi, StorefrontApi};
use pb_core::services::verification::SmsServiceTrait;

use crate::routes;

/// Application state that holds shared services
pub struct AppState<R, S, C, A, F>
where
    R: OtpChallengeRepository,
    S: SmsServiceTrait,
    C: CustomerIdentityRepository,
    A: CommerceAdminApi,
    F: StorefrontApi,
{
    pub auth_service: Arc<AuthService<R, S, C, A, F>>,
    /// Whether both commerce surfaces have credentials, reported by `/health`
    pub commerce_configured: bool,
}

/// Register every route on an actix `App` or scope
pub fn configure<R, S, C, A, F>(cfg: &mut web::ServiceConfig)
where
    R: OtpChallengeRepository + 'static,
    S: SmsServiceTrait + 'static,
    C: CustomerIdentityRepository + 'static,
    A: CommerceAdminApi + 'static,
    F: StorefrontApi + 'static,
{
    cfg.route("/", web::get().to(routes::health::root))
        .route("/health", web::get().to(routes::health::health::<R, S, C, A, F>))
        .service(
            web::scope("/api/auth")
                .route("/send-otp", web::post().to(routes::auth::send_otp::<R, S, C, A, F>))
                .route("/verify-otp", web::post().to(routes::auth::verify_otp::<R, S, C, A, F>))
                .route("/health", web::get().to(routes::auth::auth_health)),
        )
        .service(
            web::scope("/api/customer")
                .route("/profile", web::get().to(routes::customer::profile::<R, S, C, A, F>))
                .route("/check", web::get().to(routes::customer::check::<R, S, C, A, F>)),
        )
        .default_service(web::route().to(not_found));
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(pb_shared::ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
