//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssueOtpResult {
    /// Email address the code was issued for
    pub identifier: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Message ID reported by the email transport
    pub message_id: String,
}
