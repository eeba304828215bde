use actix_web::{web, HttpResponse};

use ck_core::{EmailServiceTrait, OtpStoreTrait};
use ck_shared::MessageResponse;

use super::AppState;
use crate::dto::VerifyOtpRequest;
use crate::handlers::otp_error_response;

const EMAIL_AND_OTP_REQUIRED: &str = "Email and OTP are required";

/// Handler for POST /api/verify-otp
///
/// # Request Body
///
/// ```json
/// { "email": "student@campus.edu", "otp": "482913" }
/// ```
///
/// # Responses
///
/// - 200 `{ "message": "OTP verified successfully" }`, the code is consumed
/// - 400 with one of "Email and OTP are required", "OTP not found or
///   expired", "OTP expired" or "Invalid OTP"
pub async fn verify_otp<S, E>(
    state: web::Data<AppState<S, E>>,
    request: Option<web::Json<VerifyOtpRequest>>,
) -> HttpResponse
where
    S: OtpStoreTrait + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let body = request.map(web::Json::into_inner).unwrap_or_default();
    let email = body.email.unwrap_or_default();
    let otp = body.otp.unwrap_or_default();

    match state.otp_service.verify(&email, &otp).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("OTP verified successfully")),
        Err(error) => otp_error_response(&error, EMAIL_AND_OTP_REQUIRED),
    }
}
