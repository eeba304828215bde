//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{environment::Environment, parse_var};
use crate::errors::ConfigError;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Maximum JSON payload size in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0, // Use all CPU cores
            max_payload_size: default_max_payload_size(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `SERVER_HOST`, `SERVER_PORT`, `SERVER_WORKERS` and
    /// `CORS_ALLOWED_ORIGINS`
    pub fn from_lookup<F>(env: Environment, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("SERVER_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_var(lookup, "SERVER_PORT")?.unwrap_or(defaults.port),
            workers: parse_var(lookup, "SERVER_WORKERS")?.unwrap_or(defaults.workers),
            max_payload_size: parse_var(lookup, "SERVER_MAX_PAYLOAD_SIZE")?
                .unwrap_or(defaults.max_payload_size),
            cors: CorsConfig::from_lookup(env, lookup),
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Explicitly allowed origins
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Accept any origin (development convenience)
    #[serde(default)]
    pub allow_any_origin: bool,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_any_origin: true,
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Load from `CORS_ALLOWED_ORIGINS` (comma separated) and `CORS_MAX_AGE`.
    ///
    /// Outside production an empty origin list accepts any origin; in
    /// production it leaves only same-origin requests.
    pub fn from_lookup<F>(env: Environment, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let max_age = lookup("CORS_MAX_AGE")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(default_max_age);

        Self {
            allow_any_origin: allowed_origins.is_empty() && !env.is_production(),
            allowed_origins,
            max_age,
        }
    }
}

fn default_max_payload_size() -> usize {
    16 * 1024 // 16 KB, bodies are a couple of short strings
}

fn default_max_age() -> usize {
    3600
}
