//! OTP service module for email-based verification
//!
//! This module provides the one-time password workflow:
//! - Code generation in the closed range 100000..=999999
//! - Storage keyed by email with a fixed 5-minute lifetime
//! - Email dispatch through an injected transport
//! - Single-use verification with lazy expiry

mod code_generator;
mod service;
mod traits;
mod types;


pub use code_generator::{CodeGenerator, RandomCodeGenerator, SequenceCodeGenerator};
pub use service::OtpService;
pub use traits::{EmailServiceTrait, OtpStoreTrait};
pub use types::IssueOtpResult;
