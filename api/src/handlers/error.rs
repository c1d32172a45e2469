use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use validator::ValidationErrors;

use pb_core::errors::AuthError;
use pb_shared::{error_codes, ErrorResponse};

/// HTTP status for each caller-facing error
pub fn status_for(error: &AuthError) -> StatusCode {
    match error {
        AuthError::RateLimited { .. } | AuthError::ChallengeAttemptsExhausted => {
            StatusCode::TOO_MANY_REQUESTS
        }
        AuthError::InvalidInput { .. }
        | AuthError::ChallengeNotFound
        | AuthError::ChallengeAlreadyUsed
        | AuthError::ChallengeExpired
        | AuthError::CodeMismatch { .. } => StatusCode::BAD_REQUEST,
        AuthError::CustomerNotFound => StatusCode::NOT_FOUND,
        AuthError::BridgeFailed { .. } | AuthError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convert an authentication error into a JSON error response
///
/// `Internal` carries diagnostic text that is logged here and never sent.
pub fn handle_auth_error(error: &AuthError) -> HttpResponse {
    let status = status_for(error);

    match error {
        AuthError::Internal { message } => {
            tracing::error!(error = %message, event = "internal_error", "Request failed");
        }
        AuthError::BridgeFailed { reason, detail } => {
            tracing::error!(reason = %reason, detail = %detail, event = "bridge_failed", "Request failed");
        }
        other if status.is_server_error() => {
            tracing::error!(error = %other, "Request failed");
        }
        other => {
            tracing::debug!(error = %other, "Request rejected");
        }
    }

    let mut body = ErrorResponse::new(error.error_code(), error.to_string());
    let mut response = HttpResponse::build(status);

    match error {
        AuthError::RateLimited { retry_after_seconds, .. } => {
            body = body.add_detail("retry_after_seconds", retry_after_seconds);
            response.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
        }
        AuthError::CodeMismatch { remaining_attempts } => {
            body = body.add_detail("remaining_attempts", remaining_attempts);
        }
        _ => {}
    }

    response.json(body)
}

/// Convert request body validation errors into a 400 response
pub fn handle_validation_error(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::INVALID_INPUT, "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(body)
}
