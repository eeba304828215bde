//! OTP route handlers
//!
//! - `POST /api/issue-otp`: generate a code and email it
//! - `POST /api/verify-otp`: check a submitted code

use std::sync::Arc;

use ck_core::{EmailServiceTrait, OtpService, OtpStoreTrait};

pub mod issue_otp;
pub mod verify_otp;

pub use issue_otp::issue_otp;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<S, E>
where
    S: OtpStoreTrait,
    E: EmailServiceTrait + ?Sized,
{
    pub otp_service: Arc<OtpService<S, E>>,
}

impl<S, E> AppState<S, E>
where
    S: OtpStoreTrait,
    E: EmailServiceTrait + ?Sized,
{
    pub fn new(otp_service: Arc<OtpService<S, E>>) -> Self {
        Self { otp_service }
    }
}
