//! Traits for store and email transport integration

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::PendingOtp;
use crate::errors::OtpResult;

/// Keyed storage of pending codes, one record per identifier
#[async_trait]
pub trait OtpStoreTrait: Send + Sync {
    /// Insert or overwrite the record for `identifier`, expiring `ttl` from now
    async fn put(&self, identifier: &str, code: &str, ttl: Duration) -> OtpResult<PendingOtp>;
    /// Current record for `identifier`, if any
    async fn get(&self, identifier: &str) -> OtpResult<Option<PendingOtp>>;
    /// Remove any record for `identifier`; no-op when absent
    async fn delete(&self, identifier: &str) -> OtpResult<()>;
    /// Remove the record only if it is still the issuance `record` refers to.
    /// Returns whether anything was removed.
    async fn remove_if_current(&self, record: &PendingOtp) -> OtpResult<bool>;
    /// Remove every record expired at `now`, returning how many were dropped
    async fn purge_expired(&self, now: DateTime<Utc>) -> OtpResult<usize>;
    /// Number of pending records
    async fn pending_count(&self) -> OtpResult<usize>;
}

/// Trait for outbound email integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a one-time password to an email address.
    ///
    /// Returns the transport's message ID on success.
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;
}
