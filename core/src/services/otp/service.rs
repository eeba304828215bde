//! Main OTP service implementation

use std::sync::Arc;

use ck_shared::mask_email;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::{PendingOtp, OTP_TTL_MINUTES};
use crate::errors::{OtpError, OtpResult};

use super::code_generator::{CodeGenerator, RandomCodeGenerator};
use super::traits::{EmailServiceTrait, OtpStoreTrait};
use super::types::IssueOtpResult;

/// Issues and verifies email one-time passwords.
///
/// `E` may be unsized so a transport chosen at startup can be injected as
/// `Arc<dyn EmailServiceTrait>`.
pub struct OtpService<S: OtpStoreTrait, E: EmailServiceTrait + ?Sized> {
    /// Store holding pending codes
    store: Arc<S>,
    /// Email transport used to deliver codes
    email_service: Arc<E>,
    /// Time source for expiry checks; must be the store's clock
    clock: Arc<dyn Clock>,
    /// Source of fresh codes
    code_generator: Arc<dyn CodeGenerator>,
}

impl<S: OtpStoreTrait, E: EmailServiceTrait + ?Sized> OtpService<S, E> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Pending code store
    /// * `email_service` - Email transport implementation
    /// * `clock` - Time source shared with the store
    pub fn new(store: Arc<S>, email_service: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            email_service,
            clock,
            code_generator: Arc::new(RandomCodeGenerator),
        }
    }

    /// Create a service on the wall clock
    pub fn with_system_clock(store: Arc<S>, email_service: Arc<E>) -> Self {
        Self::new(store, email_service, Arc::new(SystemClock))
    }

    /// Replace the code generator
    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Issue a code to an email address
    ///
    /// This method:
    /// 1. Rejects a missing identifier
    /// 2. Generates a new code
    /// 3. Stores it for 5 minutes, replacing any pending code
    /// 4. Sends it by email
    ///
    /// The record is stored before dispatch and stays valid when dispatch
    /// fails; the caller still sees `DispatchFailure`.
    pub async fn issue(&self, identifier: &str) -> OtpResult<IssueOtpResult> {
        if identifier.is_empty() {
            return Err(OtpError::missing("email"));
        }

        let code = self.code_generator.generate();
        let record = self
            .store
            .put(identifier, &code, PendingOtp::default_ttl())
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(identifier),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store OTP"
                );
                e
            })?;

        tracing::info!(
            email = %mask_email(identifier),
            session_id = %record.id,
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued new OTP"
        );

        let message_id = self
            .email_service
            .send_otp_email(identifier, &record.code, OTP_TTL_MINUTES)
            .await
            .map_err(|reason| {
                tracing::error!(
                    email = %mask_email(identifier),
                    session_id = %record.id,
                    error = %reason,
                    event = "otp_dispatch_failed",
                    "Failed to send OTP email, pending code kept"
                );
                OtpError::DispatchFailure { reason }
            })?;

        Ok(IssueOtpResult {
            identifier: record.identifier,
            expires_at: record.expires_at,
            message_id,
        })
    }

    /// Verify a submitted code
    ///
    /// On success the pending record is consumed. An expired record is
    /// removed by the attempt that finds it. A wrong code leaves the record
    /// in place so the caller can try again until expiry.
    pub async fn verify(&self, identifier: &str, code: &str) -> OtpResult<()> {
        if identifier.is_empty() {
            return Err(OtpError::missing("email"));
        }
        if code.is_empty() {
            return Err(OtpError::missing("otp"));
        }

        let record = match self.store.get(identifier).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    email = %mask_email(identifier),
                    event = "otp_not_found",
                    "No pending OTP for email"
                );
                return Err(OtpError::NotFound);
            }
        };

        if record.is_expired_at(self.clock.now()) {
            // A concurrent re-issue may already have replaced it; leave that one alone
            self.store.remove_if_current(&record).await?;
            tracing::warn!(
                email = %mask_email(identifier),
                session_id = %record.id,
                event = "otp_expired",
                "Expired OTP removed"
            );
            return Err(OtpError::Expired);
        }

        if !record.matches(code) {
            tracing::warn!(
                email = %mask_email(identifier),
                session_id = %record.id,
                event = "otp_mismatch",
                "Submitted OTP does not match"
            );
            return Err(OtpError::Mismatch);
        }

        if !self.store.remove_if_current(&record).await? {
            // Consumed or replaced between lookup and removal
            tracing::warn!(
                email = %mask_email(identifier),
                session_id = %record.id,
                event = "otp_not_found",
                "OTP consumed by a concurrent request"
            );
            return Err(OtpError::NotFound);
        }

        tracing::info!(
            email = %mask_email(identifier),
            session_id = %record.id,
            event = "otp_verified",
            "OTP verified"
        );
        Ok(())
    }

    /// Number of codes currently pending
    pub async fn pending_count(&self) -> OtpResult<usize> {
        self.store.pending_count().await
    }
}
