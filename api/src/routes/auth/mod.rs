//! Authentication route handlers
//!
//! - `POST /api/auth/send-otp`
//! - `POST /api/auth/verify-otp`
//! - `GET /api/auth/health`

mod send_otp;
mod verify_otp;

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

use actix_web::HttpResponse;

/// Liveness probe for the auth routes
pub async fn auth_health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "PhoneBridge Auth API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
