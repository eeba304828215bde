//! SMTP email transport
//!
//! Sends OTP emails through an authenticated relay. Port 465 uses implicit
//! TLS; any other port upgrades with STARTTLS.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use ck_core::EmailServiceTrait;
use ck_shared::{mask_email, EmailConfig};

use super::{render_otp_body, OTP_EMAIL_SUBJECT};
use crate::InfrastructureError;

/// Port on which the relay expects TLS from the first byte
const IMPLICIT_TLS_PORT: u16 = 465;

/// Email service backed by a lettre async transport
pub struct SmtpEmailService<T = AsyncSmtpTransport<Tokio1Executor>> {
    transport: T,
    from: Mailbox,
}

impl SmtpEmailService<AsyncSmtpTransport<Tokio1Executor>> {
    /// Build an SMTP relay transport from configuration.
    ///
    /// No connection is opened until the first email is sent.
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let username = config
            .username
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_USER is not set".to_string()))?;
        let password = config
            .password
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_PASS is not set".to_string()))?;

        let address: Address = username.parse().map_err(|e| {
            InfrastructureError::Config(format!("EMAIL_USER is not a valid address: {}", e))
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };
        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP email transport configured"
        );

        Ok(Self::with_transport(transport, from))
    }
}

impl<T> SmtpEmailService<T> {
    /// Wrap an existing transport
    pub fn with_transport(transport: T, from: Mailbox) -> Self {
        Self { transport, from }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn build_message(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
        message_id: &str,
    ) -> Result<Message, InfrastructureError> {
        let to: Mailbox = email.parse().map_err(|e| {
            InfrastructureError::Email(format!(
                "Invalid recipient address {}: {}",
                mask_email(email),
                e
            ))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(OTP_EMAIL_SUBJECT)
            .message_id(Some(message_id.to_string()))
            .header(ContentType::TEXT_PLAIN)
            .body(render_otp_body(code, expires_in_minutes))
            .map_err(|e| InfrastructureError::Email(e.to_string()))
    }
}

#[async_trait]
impl<T> EmailServiceTrait for SmtpEmailService<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: std::error::Error,
{
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let message_id = format!("<{}@campuskonnect>", Uuid::new_v4());
        let message = self
            .build_message(email, code, expires_in_minutes, &message_id)
            .map_err(|e| e.to_string())?;

        self.transport.send(message).await.map_err(|e| {
            tracing::warn!(
                target: "email_service",
                provider = "smtp",
                email = %mask_email(email),
                error = %e,
                "SMTP delivery failed"
            );
            format!("SMTP delivery failed: {}", e)
        })?;

        tracing::info!(
            target: "email_service",
            provider = "smtp",
            email = %mask_email(email),
            message_id = %message_id,
            "OTP email sent"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettre::transport::stub::AsyncStubTransport;

    fn sender() -> Mailbox {
        "Campus Konnect <noreply@campus.edu>".parse().unwrap()
    }

    #[tokio::test]
    async fn test_sends_code_to_recipient() {
        let service = SmtpEmailService::with_transport(AsyncStubTransport::new_ok(), sender());

        let message_id = service
            .send_otp_email("student@campus.edu", "482913", 5)
            .await
            .unwrap();
        assert!(message_id.ends_with("@campuskonnect>"));

        let messages = service.transport().messages().await;
        assert_eq!(messages.len(), 1);

        let (envelope, content) = &messages[0];
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "student@campus.edu");
        assert_eq!(
            envelope.from().map(|a| a.to_string()),
            Some("noreply@campus.edu".to_string())
        );
        assert!(content.contains("Subject: Your OTP Code"));
        assert!(content.contains("Your OTP is: 482913"));
        assert!(content.contains(&message_id));
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let service = SmtpEmailService::with_transport(AsyncStubTransport::new_error(), sender());

        let result = service.send_otp_email("student@campus.edu", "482913", 5).await;
        assert!(result.unwrap_err().starts_with("SMTP delivery failed"));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected_before_sending() {
        let service = SmtpEmailService::with_transport(AsyncStubTransport::new_ok(), sender());

        let result = service.send_otp_email("not-an-address", "482913", 5).await;
        assert!(result.is_err());
        assert!(service.transport().messages().await.is_empty());
    }

    #[test]
    fn test_from_config_requires_valid_sender() {
        let mut config = EmailConfig::from_lookup(
            ck_shared::Environment::Production,
            &|_: &str| -> Option<String> { None },
        )
        .unwrap();
        assert!(matches!(
            SmtpEmailService::from_config(&config),
            Err(InfrastructureError::Config(_))
        ));

        config.username = Some("not an address".to_string());
        config.password = Some("secret".to_string());
        assert!(matches!(
            SmtpEmailService::from_config(&config),
            Err(InfrastructureError::Config(_))
        ));
    }
}
