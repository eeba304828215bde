//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `email` - Outbound email transport (SMTP credentials, sender)
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `store` - Pending OTP store maintenance
//!
//! Every section is read from environment variables. Loaders take a lookup
//! function so tests can supply variables without touching the process
//! environment.

pub mod email;
pub mod environment;
pub mod server;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

// Re-export commonly used types
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use store::OtpStoreConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Whether the environment was named explicitly rather than defaulted
    #[serde(skip)]
    pub environment_explicit: bool,

    /// Server configuration
    pub server: ServerConfig,

    /// Email transport configuration
    pub email: EmailConfig,

    /// Pending OTP store configuration
    #[serde(default)]
    pub store: OtpStoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using a custom variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = Environment::explicit_from_lookup(&lookup);
        let environment = explicit.unwrap_or_default();
        let config = Self {
            environment,
            environment_explicit: explicit.is_some(),
            server: ServerConfig::from_lookup(environment, &lookup)?,
            email: EmailConfig::from_lookup(environment, &lookup)?,
            store: OtpStoreConfig::from_lookup(&lookup)?,
            logging: LoggingConfig::from_lookup(environment, &lookup)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-section constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.email.validate()
    }

    /// True when codes will only be printed to the console because no
    /// environment was named. A misconfigured deployment lands here.
    pub fn mock_email_by_default(&self) -> bool {
        !self.environment_explicit && self.email.provider == EmailProvider::Mock
    }
}

/// Parse an optional numeric variable, reporting the offending key on failure
pub(crate) fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_for_development() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.email.provider, EmailProvider::Mock);
        assert!(config.store.sweep_interval_secs.is_none());
    }

    #[test]
    fn test_defaulted_environment_flags_mock_email() {
        let defaulted = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(!defaulted.environment_explicit);
        assert!(defaulted.mock_email_by_default());

        // An unrecognised value also falls back to development
        let unparsable = AppConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "prod-eu")])).unwrap();
        assert_eq!(unparsable.environment, Environment::Development);
        assert!(unparsable.mock_email_by_default());

        let explicit = AppConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "development")])).unwrap();
        assert!(explicit.environment_explicit);
        assert!(!explicit.mock_email_by_default());
    }

    #[test]
    fn test_production_requires_smtp_credentials() {
        let result = AppConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "production")]));
        assert!(matches!(result, Err(ConfigError::MissingVar { .. })));

        let config = AppConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("EMAIL_USER", "noreply@campuskonnect.edu"),
            ("EMAIL_PASS", "app-password"),
        ]))
        .unwrap();
        assert_eq!(config.email.provider, EmailProvider::Smtp);
        assert_eq!(config.email.username.as_deref(), Some("noreply@campuskonnect.edu"));
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let result = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")]));
        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "SERVER_PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("Expected invalid value error, got {:?}", other),
        }
    }
}
