//! Pending one-time password entity for email verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the one-time password
pub const CODE_LENGTH: usize = 6;

/// Smallest code ever issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code ever issued
pub const CODE_MAX: u32 = 999_999;

/// Lifetime of an issued code (5 minutes)
pub const OTP_TTL_MINUTES: i64 = 5;

/// A code waiting to be verified for one email address.
///
/// Records are never updated in place: a new issuance replaces the record
/// wholesale, so `id` identifies one specific issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOtp {
    /// Unique identifier of this issuance
    pub id: Uuid,

    /// Email address the code was sent to (store key)
    pub identifier: String,

    /// The 6-digit code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl PendingOtp {
    /// Creates a record issued at `issued_at` that lives for `ttl`
    pub fn new(
        identifier: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            code: code.into(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    /// The fixed lifetime of every issued code
    pub fn default_ttl() -> Duration {
        Duration::minutes(OTP_TTL_MINUTES)
    }

    /// A code is expired strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Exact, case-sensitive comparison against a submitted code
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_new_sets_expiry_from_ttl() {
        let otp = PendingOtp::new("a@x.com", "123456", issued_at(), PendingOtp::default_ttl());

        assert_eq!(otp.identifier, "a@x.com");
        assert_eq!(otp.code, "123456");
        assert_eq!(otp.expires_at - otp.issued_at, Duration::minutes(5));
    }

    #[test]
    fn test_expiry_boundary() {
        let otp = PendingOtp::new("b@x.com", "654321", issued_at(), Duration::seconds(300));

        assert!(!otp.is_expired_at(issued_at() + Duration::seconds(10)));
        // Exactly at expires_at the code is still accepted
        assert!(!otp.is_expired_at(issued_at() + Duration::seconds(300)));
        assert!(otp.is_expired_at(issued_at() + Duration::seconds(301)));
    }

    #[test]
    fn test_matches_is_exact() {
        let otp = PendingOtp::new("c@x.com", "482913", issued_at(), PendingOtp::default_ttl());

        assert!(otp.matches("482913"));
        assert!(!otp.matches("482914"));
        assert!(!otp.matches(" 482913"));
        assert!(!otp.matches("48291"));
        assert!(!otp.matches(""));
    }

    #[test]
    fn test_each_issuance_has_distinct_id() {
        let first = PendingOtp::new("d@x.com", "111111", issued_at(), PendingOtp::default_ttl());
        let second = PendingOtp::new("d@x.com", "111111", issued_at(), PendingOtp::default_ttl());
        assert_ne!(first.id, second.id);
        assert_ne!(first, second);
    }
}
