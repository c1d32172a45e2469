use actix_web::{web, HttpResponse};
use validator::Validate;

use pb_core::repositories::{CustomerIdentityRepository, OtpChallengeRepository};
use pb_core::services::bridge::{CommerceAdminApi, StorefrontApi};
use pb_core::services::verification::SmsServiceTrait;
use pb_shared::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{handle_auth_error, handle_validation_error};

/// Handler for POST /api/auth/verify-otp
///
/// Verifies the code and logs the customer into the storefront, creating the
/// platform customer on first login.
///
/// # Request Body
///
/// ```json
/// {
///     "phone": "+919876543210",
///     "otp": "123456",
///     "session_id": "k3J9..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Login successful",
///     "customer": { "id": "...", "phone": "+919876543210", "shopify_customer_id": "gid://shopify/Customer/1", ... },
///     "access_token": "...",
///     "token_expires_at": "2026-11-15T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400: invalid input, unknown session, code already used, expired, wrong code
/// - 429: rate limited, or attempts on this code exhausted
/// - 500: the storefront login failed after the code was accepted
pub async fn verify_otp<R, S, C, A, F>(
    state: web::Data<AppState<R, S, C, A, F>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    R: OtpChallengeRepository + 'static,
    S: SmsServiceTrait + 'static,
    C: CustomerIdentityRepository + 'static,
    A: CommerceAdminApi + 'static,
    F: StorefrontApi + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .auth_service
        .verify_otp(&request.phone, &request.otp, &request.session_id)
        .await
    {
        Ok(result) => {
            tracing::info!(
                phone = %mask_phone_number(&request.phone),
                customer_id = %result.customer.platform_customer_id,
                event = "login_succeeded",
                "Customer logged in"
            );

            HttpResponse::Ok().json(VerifyOtpResponse {
                success: true,
                message: "Login successful".to_string(),
                customer: Some(result.customer.into()),
                access_token: Some(result.access_token),
                token_expires_at: Some(result.expires_at),
            })
        }
        Err(error) => handle_auth_error(&error),
    }
}
