//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `ck_core`:
//!
//! - **Cache**: in-process pending OTP store and its expiry sweeper
//! - **Email**: SMTP delivery through lettre, plus a console mock for development

use std::sync::Arc;

use ck_core::{Clock, EmailServiceTrait};
use ck_shared::AppConfig;

// Re-export core types for convenience
pub use ck_core::errors::*;

/// Cache module - pending OTP storage
pub mod cache;

/// Email module - OTP delivery
pub mod email;

pub use cache::{spawn_sweeper, InMemoryOtpStore};
pub use email::{create_email_service, MockEmailService, SmtpEmailService};

/// Infrastructure services container
pub struct InfrastructureServices {
    /// Pending OTP store shared by all workers
    pub store: Arc<InMemoryOtpStore>,
    /// Outbound email transport
    pub email_service: Arc<dyn EmailServiceTrait>,
}

impl InfrastructureServices {
    /// Build the store and email transport from configuration.
    ///
    /// `clock` must be the same clock handed to the OTP service.
    pub fn initialize(
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, InfrastructureError> {
        tracing::info!("Initializing infrastructure services...");

        if config.mock_email_by_default() {
            tracing::warn!(
                environment = %config.environment,
                event = "mock_email_fallback",
                "ENVIRONMENT is unset or unrecognised; OTP emails will only be printed to the console. Set ENVIRONMENT or EMAIL_PROVIDER explicitly"
            );
        }

        let store = Arc::new(InMemoryOtpStore::new(clock));
        let email_service = create_email_service(&config.email)?;

        tracing::info!(
            email_provider = %config.email.provider,
            "Infrastructure services initialized successfully"
        );

        Ok(Self {
            store,
            email_service,
        })
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMTP transport could not be built
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Email could not be composed or sent
    #[error("Email service error: {0}")]
    Email(String),
}
