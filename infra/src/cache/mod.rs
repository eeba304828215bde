//! Cache module for pending OTP storage
//!
//! Pending codes live in process memory for at most five minutes, so a
//! single-node map behind an async lock is all the service needs. Records
//! are lost on restart; users simply request a new code.

pub mod otp_store;
pub mod sweeper;

pub use otp_store::InMemoryOtpStore;
pub use sweeper::spawn_sweeper;
