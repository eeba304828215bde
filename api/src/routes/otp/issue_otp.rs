use actix_web::{web, HttpResponse};

use ck_core::{EmailServiceTrait, OtpStoreTrait};
use ck_shared::MessageResponse;

use super::AppState;
use crate::dto::IssueOtpRequest;
use crate::handlers::otp_error_response;

const EMAIL_REQUIRED: &str = "Email is required";

/// Handler for POST /api/issue-otp
///
/// Sends a fresh code to the given address, replacing any code still
/// pending for it.
///
/// # Request Body
///
/// ```json
/// { "email": "student@campus.edu" }
/// ```
///
/// # Responses
///
/// - 200 `{ "message": "OTP sent successfully" }`
/// - 400 `{ "message": "Email is required" }`
/// - 500 `{ "message": "Failed to send OTP" }`
///
/// A body that is not JSON of this shape is treated as a missing email.
pub async fn issue_otp<S, E>(
    state: web::Data<AppState<S, E>>,
    request: Option<web::Json<IssueOtpRequest>>,
) -> HttpResponse
where
    S: OtpStoreTrait + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let email = request
        .and_then(|body| body.into_inner().email)
        .unwrap_or_default();

    match state.otp_service.issue(&email).await {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new("OTP sent successfully")),
        Err(error) => otp_error_response(&error, EMAIL_REQUIRED),
    }
}
