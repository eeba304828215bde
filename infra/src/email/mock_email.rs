//! Mock Email Service Implementation
//!
//! Prints OTP emails to the console instead of sending them. Used in
//! development and by API tests, which read the delivered code back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use ck_core::EmailServiceTrait;
use ck_shared::mask_email;

use super::{render_otp_body, OTP_EMAIL_SUBJECT};

/// Mock email service for development and testing
///
/// This implementation:
/// - Prints each OTP email to the console
/// - Remembers the last code sent to each address
/// - Generates mock message IDs
/// - Can simulate delivery failures
#[derive(Clone)]
pub struct MockEmailService {
    /// Number of emails sent
    message_count: Arc<AtomicU64>,
    /// Last code delivered per address
    last_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_codes: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of emails sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last code delivered to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.last_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let masked_email = mask_email(email);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                "Mock email service simulating failure for: {}",
                masked_email
            );
            return Err("Simulated email sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.last_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(email.to_string(), code.to_string());

        if self.console_output {
            // Development aid: the whole point is to see the code
            println!("\n{}", "=".repeat(60));
            println!("📧 MOCK EMAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} (masked: {})", email, masked_email);
            println!("Subject: {}", OTP_EMAIL_SUBJECT);
            println!("Message ID: {}", message_id);
            println!("{}", render_otp_body(code, expires_in_minutes));
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "mock",
            email = %masked_email,
            message_id = %message_id,
            "Mock OTP email sent"
        );

        Ok(message_id)
    }
}
