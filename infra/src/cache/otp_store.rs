//! In-memory pending OTP store
//!
//! One record per email address. Every mutation runs under the write lock,
//! so concurrent issue and verify calls for the same address are
//! linearizable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use ck_core::{Clock, OtpResult, OtpStoreTrait, PendingOtp, SystemClock};

/// Process-local store of pending codes keyed by email address
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, PendingOtp>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOtpStore {
    /// Create an empty store reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

#[async_trait]
impl OtpStoreTrait for InMemoryOtpStore {
    async fn put(&self, identifier: &str, code: &str, ttl: Duration) -> OtpResult<PendingOtp> {
        let record = PendingOtp::new(identifier, code, self.clock.now(), ttl);
        let mut records = self.records.write().await;
        records.insert(identifier.to_string(), record.clone());
        Ok(record)
    }

    async fn get(&self, identifier: &str) -> OtpResult<Option<PendingOtp>> {
        let records = self.records.read().await;
        Ok(records.get(identifier).cloned())
    }

    async fn delete(&self, identifier: &str) -> OtpResult<()> {
        let mut records = self.records.write().await;
        records.remove(identifier);
        Ok(())
    }

    async fn remove_if_current(&self, record: &PendingOtp) -> OtpResult<bool> {
        let mut records = self.records.write().await;
        match records.get(&record.identifier) {
            Some(current) if current.id == record.id => {
                records.remove(&record.identifier);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> OtpResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        Ok(before - records.len())
    }

    async fn pending_count(&self) -> OtpResult<usize> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck_core::ManualClock;

    fn store() -> (Arc<ManualClock>, InMemoryOtpStore) {
        let clock = Arc::new(ManualClock::default());
        let store = InMemoryOtpStore::new(clock.clone());
        (clock, store)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (clock, store) = store();

        let record = store
            .put("a@x.com", "123456", Duration::minutes(5))
            .await
            .unwrap();
        assert_eq!(record.issued_at, clock.now());
        assert_eq!(record.expires_at, clock.now() + Duration::minutes(5));

        let fetched = store.get("a@x.com").await.unwrap();
        assert_eq!(fetched, Some(record));
        assert_eq!(store.get("b@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_record() {
        let (_, store) = store();

        let first = store.put("a@x.com", "111111", Duration::minutes(5)).await.unwrap();
        let second = store.put("a@x.com", "222222", Duration::minutes(5)).await.unwrap();

        let current = store.get("a@x.com").await.unwrap().unwrap();
        assert_eq!(current.id, second.id);
        assert_ne!(current.id, first.id);
        assert_eq!(current.code, "222222");
        assert_eq!(store.pending_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_verbatim() {
        let (_, store) = store();

        store.put("A@x.com", "111111", Duration::minutes(5)).await.unwrap();
        assert!(store.get("a@x.com").await.unwrap().is_none());
        assert!(store.get(" A@x.com").await.unwrap().is_none());
        assert!(store.get("A@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_, store) = store();

        store.put("a@x.com", "123456", Duration::minutes(5)).await.unwrap();
        store.delete("a@x.com").await.unwrap();
        store.delete("a@x.com").await.unwrap();
        assert!(store.get("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_if_current_ignores_replaced_record() {
        let (_, store) = store();

        let stale = store.put("a@x.com", "111111", Duration::minutes(5)).await.unwrap();
        let fresh = store.put("a@x.com", "222222", Duration::minutes(5)).await.unwrap();

        assert!(!store.remove_if_current(&stale).await.unwrap());
        assert!(store.get("a@x.com").await.unwrap().is_some());

        assert!(store.remove_if_current(&fresh).await.unwrap());
        assert!(!store.remove_if_current(&fresh).await.unwrap());
        assert!(store.get("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_records() {
        let (clock, store) = store();

        store.put("old@x.com", "111111", Duration::minutes(1)).await.unwrap();
        store.put("new@x.com", "222222", Duration::minutes(5)).await.unwrap();

        // Exactly at expiry nothing is purged
        assert_eq!(store.purge_expired(clock.now() + Duration::minutes(1)).await.unwrap(), 0);

        clock.advance(Duration::minutes(2));
        assert_eq!(store.purge_expired(clock.now()).await.unwrap(), 1);
        assert!(store.get("old@x.com").await.unwrap().is_none());
        assert!(store.get("new@x.com").await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_removal_has_one_winner() {
        let (_, store) = store();
        let store = Arc::new(store);

        let record = store.put("a@x.com", "123456", Duration::minutes(5)).await.unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let record = record.clone();
                tokio::spawn(async move { store.remove_if_current(&record).await.unwrap() })
            })
            .collect();

        let mut removed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                removed += 1;
            }
        }
        assert_eq!(removed, 1);
    }
}
