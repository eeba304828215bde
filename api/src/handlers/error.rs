//! Maps `OtpError` onto HTTP responses.
//!
//! Every response body is `{ "message": "..." }`. Client failures are 400,
//! transport and storage faults are 500 with a fixed message so internal
//! details never reach the caller.

use actix_web::{http::StatusCode, HttpResponse};

use ck_core::OtpError;
use ck_shared::MessageResponse;

/// Convert a service error to a response.
///
/// `required_message` is the endpoint's wording for a missing field.
pub fn otp_error_response(error: &OtpError, required_message: &str) -> HttpResponse {
    let (status, message) = match error {
        OtpError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, required_message.to_string()),
        OtpError::NotFound | OtpError::Expired | OtpError::Mismatch => {
            (StatusCode::BAD_REQUEST, error.to_string())
        }
        OtpError::DispatchFailure { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send OTP".to_string(),
        ),
        OtpError::Storage { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ),
    };

    if error.is_client_error() {
        tracing::debug!(code = error.error_code(), "Request rejected");
    } else {
        tracing::error!(error = %error, code = error.error_code(), "Request failed");
    }

    HttpResponse::build(status).json(MessageResponse::new(message))
}

/// Fallback for known paths hit with the wrong method
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(MessageResponse::new("Method not allowed"))
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::new("Not found"))
}
