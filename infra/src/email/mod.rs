//! Email Service Module
//!
//! Delivers OTP codes by email. Two transports are provided:
//!
//! - **SMTP**: authenticated relay through lettre (Gmail by default)
//! - **Mock**: console output for development and tests
//!
//! Recipient addresses are masked in every log line.

use std::sync::Arc;

use ck_core::EmailServiceTrait;
use ck_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub mod mock_email;
pub mod smtp;

pub use mock_email::MockEmailService;
pub use smtp::SmtpEmailService;

/// Subject line of every OTP email
pub const OTP_EMAIL_SUBJECT: &str = "Your OTP Code";

/// Plain-text body of an OTP email
pub fn render_otp_body(code: &str, expires_in_minutes: i64) -> String {
    format!(
        "Your OTP is: {}\n\nIt will expire in {} minutes.\nIf you did not request this code, you can ignore this email.\n",
        code, expires_in_minutes
    )
}

/// Create an email service based on configuration
///
/// # Arguments
///
/// * `config` - Email configuration containing provider settings
///
/// # Returns
///
/// A shared email service implementation, or an error when the SMTP
/// transport cannot be built from the given settings
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailServiceTrait>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::warn!("Using mock email service, codes are printed to the console");
            Ok(Arc::new(MockEmailService::new()))
        }
        EmailProvider::Smtp => Ok(Arc::new(SmtpEmailService::from_config(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck_shared::Environment;

    #[test]
    fn test_body_contains_code_and_lifetime() {
        let body = render_otp_body("482913", 5);
        assert!(body.starts_with("Your OTP is: 482913"));
        assert!(body.contains("expire in 5 minutes"));
    }

    #[test]
    fn test_mock_provider_builds() {
        let config =
            EmailConfig::from_lookup(Environment::Development, &|_: &str| -> Option<String> {
                None
            })
            .unwrap();
        assert!(create_email_service(&config).is_ok());
    }

    #[tokio::test]
    async fn test_smtp_provider_builds_without_connecting() {
        let config = EmailConfig::from_lookup(Environment::Production, &|key: &str| match key {
            "EMAIL_USER" => Some("noreply@campus.edu".to_string()),
            "EMAIL_PASS" => Some("app-password".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.provider, EmailProvider::Smtp);
        assert!(create_email_service(&config).is_ok());
    }
}
