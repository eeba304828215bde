//! Shared utilities and common types for the Campus Konnect server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON message body returned by every endpoint
//! - Utility functions (email masking for logs)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, EmailConfig, EmailProvider, Environment, LogFormat, LoggingConfig,
    OtpStoreConfig, ServerConfig,
};
pub use errors::ConfigError;
pub use types::MessageResponse;
pub use utils::mask_email;
