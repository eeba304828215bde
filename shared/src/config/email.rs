//! Email transport configuration module

use serde::{Deserialize, Serialize};

use super::{environment::Environment, parse_var};
use crate::errors::ConfigError;

/// Outbound email provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Authenticated SMTP relay
    Smtp,
    /// Console output for development
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" | "console" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

impl std::fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailProvider::Smtp => write!(f, "smtp"),
            EmailProvider::Mock => write!(f, "mock"),
        }
    }
}

/// Email transport configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Which transport delivers OTP emails
    pub provider: EmailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port (465 uses implicit TLS)
    pub smtp_port: u16,

    /// SMTP username, also used as the sender address
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password or app password
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Display name placed in the From header
    pub from_name: String,

    /// Timeout for a single SMTP exchange in seconds
    pub timeout_secs: u64,
}

impl EmailConfig {
    /// Load from `EMAIL_PROVIDER`, `SMTP_HOST`, `SMTP_PORT`, `EMAIL_USER`,
    /// `EMAIL_PASS`, `EMAIL_FROM_NAME` and `SMTP_TIMEOUT_SECS`
    pub fn from_lookup<F>(env: Environment, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("EMAIL_PROVIDER").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "EMAIL_PROVIDER".to_string(),
                value: raw,
            })?,
            None if env.is_development() => EmailProvider::Mock,
            None => EmailProvider::Smtp,
        };

        Ok(Self {
            provider,
            smtp_host: lookup("SMTP_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| String::from("smtp.gmail.com")),
            smtp_port: parse_var(lookup, "SMTP_PORT")?.unwrap_or(465),
            username: lookup("EMAIL_USER").filter(|u| !u.trim().is_empty()),
            password: lookup("EMAIL_PASS").filter(|p| !p.is_empty()),
            from_name: lookup("EMAIL_FROM_NAME")
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| String::from("Campus Konnect")),
            timeout_secs: parse_var(lookup, "SMTP_TIMEOUT_SECS")?.unwrap_or(10),
        })
    }

    /// SMTP delivery needs credentials
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider != EmailProvider::Smtp {
            return Ok(());
        }
        if self.username.is_none() {
            return Err(ConfigError::MissingVar {
                key: "EMAIL_USER".to_string(),
            });
        }
        if self.password.is_none() {
            return Err(ConfigError::MissingVar {
                key: "EMAIL_PASS".to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("provider", &self.provider)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("from_name", &self.from_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
