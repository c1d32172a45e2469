use actix_web::{web, HttpResponse};
use validator::Validate;

use pb_core::repositories::{CustomerIdentityRepository, OtpChallengeRepository};
use pb_core::services::bridge::{CommerceAdminApi, StorefrontApi};
use pb_core::services::verification::SmsServiceTrait;
use pb_shared::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::{handle_auth_error, handle_validation_error};

/// Handler for POST /api/auth/send-otp
///
/// Sends a one-time code to the phone and returns the session id the code
/// is bound to.
///
/// # Request Body
///
/// ```json
/// { "phone": "+919876543210" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP sent successfully",
///     "session_id": "k3J9..."
/// }
/// ```
///
/// SMS delivery failure still answers 200 with a session id; the message
/// says delivery failed.
///
/// ## Errors
/// - 400 `INVALID_INPUT`: malformed phone number
/// - 429 `RATE_LIMIT_EXCEEDED`: too many codes requested for this phone
pub async fn send_otp<R, S, C, A, F>(
    state: web::Data<AppState<R, S, C, A, F>>,
    request: web::Json<SendOtpRequest>,
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

    tracing::info!(
        phone = %mask_phone_number(&request.phone),
        event = "send_otp_requested",
        "Processing send-otp request"
    );

    match state.auth_service.send_otp(&request.phone).await {
        Ok(result) => HttpResponse::Ok().json(SendOtpResponse {
            success: true,
            message: result.message,
            session_id: Some(result.session_id),
        }),
        Err(error) => handle_auth_error(&error),
    }
}
