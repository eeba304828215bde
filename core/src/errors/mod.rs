//! Domain-specific error types and error handling.

use thiserror::Error;

/// Failures of OTP issuance and verification.
///
/// `NotFound` covers both "never issued" and "already consumed or purged".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Missing required field: {field}")]
    InvalidInput { field: String },

    #[error("OTP not found or expired")]
    NotFound,

    #[error("OTP expired")]
    Expired,

    #[error("Invalid OTP")]
    Mismatch,

    #[error("Failed to send OTP: {reason}")]
    DispatchFailure { reason: String },

    #[error("OTP storage error: {message}")]
    Storage { message: String },
}

impl OtpError {
    pub fn missing(field: impl Into<String>) -> Self {
        OtpError::InvalidInput {
            field: field.into(),
        }
    }

    /// Stable code for logs and programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::InvalidInput { .. } => "INVALID_INPUT",
            OtpError::NotFound => "OTP_NOT_FOUND",
            OtpError::Expired => "OTP_EXPIRED",
            OtpError::Mismatch => "OTP_MISMATCH",
            OtpError::DispatchFailure { .. } => "DISPATCH_FAILURE",
            OtpError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Whether the caller's input caused the failure (as opposed to a
    /// transport or storage fault)
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            OtpError::DispatchFailure { .. } | OtpError::Storage { .. }
        )
    }
}

pub type OtpResult<T> = Result<T, OtpError>;
