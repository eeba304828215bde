//! Background purge of expired codes
//!
//! Verification already rejects expired records, so the sweeper only bounds
//! memory held by codes nobody came back for.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use ck_core::{Clock, OtpStoreTrait};

/// Spawn a task that purges expired records every `period`.
///
/// The first sweep runs one `period` after spawning. Abort the returned
/// handle to stop it.
pub fn spawn_sweeper<S>(store: Arc<S>, clock: Arc<dyn Clock>, period: Duration) -> JoinHandle<()>
where
    S: OtpStoreTrait + 'static,
{
    tracing::info!(period_secs = period.as_secs(), "Starting expired OTP sweeper");

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match store.purge_expired(clock.now()).await {
                Ok(0) => {}
                Ok(purged) => {
                    tracing::debug!(purged, event = "otp_purged", "Purged expired OTPs");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Expired OTP sweep failed");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryOtpStore;
    use ck_core::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_expired_records() {
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(InMemoryOtpStore::new(clock.clone()));

        store
            .put("old@x.com", "111111", chrono::Duration::minutes(1))
            .await
            .unwrap();
        store
            .put("new@x.com", "222222", chrono::Duration::minutes(10))
            .await
            .unwrap();
        clock.advance(chrono::Duration::minutes(2));

        let handle = spawn_sweeper(store.clone(), clock.clone(), Duration::from_secs(10));

        // Nothing happens before the first period elapses
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(store.pending_count().await.unwrap(), 2);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(store.pending_count().await.unwrap(), 1);
        assert!(store.get("new@x.com").await.unwrap().is_some());

        handle.abort();
    }
}
