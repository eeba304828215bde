//! Error and fallback response handlers

pub mod error;

pub use error::{method_not_allowed, not_found, otp_error_response};
