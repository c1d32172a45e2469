//! Customer lookup handlers
//!
//! - `GET /api/customer/profile?phone=`
//! - `GET /api/customer/check?phone=`

use actix_web::{web, HttpResponse};
use validator::Validate;

use pb_core::repositories::{CustomerIdentityRepository, OtpChallengeRepository};
use pb_core::services::bridge::{CommerceAdminApi, StorefrontApi};
use pb_core::services::verification::SmsServiceTrait;

use crate::app::AppState;
use crate::dto::{CustomerData, CustomerExistsResponse, PhoneQuery};
use crate::handlers::{handle_auth_error, handle_validation_error};

/// Public profile of the customer behind a phone number; 404 when unknown
pub async fn profile<R, S, C, A, F>(
    state: web::Data<AppState<R, S, C, A, F>>,
    query: web::Query<PhoneQuery>,
) -> HttpResponse
where
    R: OtpChallengeRepository + 'static,
    S: SmsServiceTrait + 'static,
    C: CustomerIdentityRepository + 'static,
    A: CommerceAdminApi + 'static,
    F: StorefrontApi + 'static,
{
    if let Err(errors) = query.validate() {
        return handle_validation_error(&errors);
    }

    match state.auth_service.customer_profile(&query.phone).await {
        Ok(profile) => HttpResponse::Ok().json(CustomerData::from(profile)),
        Err(error) => handle_auth_error(&error),
    }
}

/// Whether a customer exists for a phone number
pub async fn check<R, S, C, A, F>(
    state: web::Data<AppState<R, S, C, A, F>>,
    query: web::Query<PhoneQuery>,
) -> HttpResponse
where
    R: OtpChallengeRepository + 'static,
    S: SmsServiceTrait + 'static,
    C: CustomerIdentityRepository + 'static,
    A: CommerceAdminApi + 'static,
    F: StorefrontApi + 'static,
{
    if let Err(errors) = query.validate() {
        return handle_validation_error(&errors);
    }

    match state.auth_service.customer_exists(&query.phone).await {
        Ok(exists) => HttpResponse::Ok().json(CustomerExistsResponse {
            exists,
            phone: query.into_inner().phone,
        }),
        Err(error) => handle_auth_error(&error),
    }
}
