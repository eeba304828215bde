//! Domain entities representing core business objects.

pub mod pending_otp;

// Re-export commonly used types
pub use pending_otp::{PendingOtp, CODE_LENGTH, CODE_MAX, CODE_MIN, OTP_TTL_MINUTES};
