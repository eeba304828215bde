//! # Campus Konnect Core
//!
//! Core business logic and domain layer for the Campus Konnect OTP service.
//! This crate contains the pending-code entity, the issue/verify service,
//! the store and email seams it depends on, and the error taxonomy.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use services::*;
