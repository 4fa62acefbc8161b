//! In-process session registry.
//!
//! Same contract as the Redis store, including expiry and overwrite. It can be
//! switched into an "unavailable" mode so callers can exercise their outage
//! handling without a real network failure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use coursekeep_core::AuthError;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::store::{SessionStore, ttl_seconds};

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<i64, (String, Instant)>>,
    unavailable: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every call fails with [`AuthError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AuthError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::Unavailable(
                "session registry unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(
        &self,
        user_id: i64,
        refresh_token: &str,
        ttl: Duration,
    ) -> Result<(), AuthError> {
        self.check_available()?;
        let seconds = ttl_seconds(ttl)?;

        let expires_at = Instant::now() + Duration::from_secs(seconds);
        self.entries
            .lock()
            .await
            .insert(user_id, (refresh_token.to_string(), expires_at));

        Ok(())
    }

    async fn get(&self, user_id: i64) -> Result<String, AuthError> {
        self.check_available()?;

        let mut entries = self.entries.lock().await;
        match entries.get(&user_id) {
            Some((value, expires_at)) if Instant::now() < *expires_at => Ok(value.clone()),
            Some(_) => {
                entries.remove(&user_id);
                Err(AuthError::NotFound)
            }
            None => Err(AuthError::NotFound),
        }
    }

    async fn delete(&self, user_id: i64) -> Result<(), AuthError> {
        self.check_available()?;
        self.entries.lock().await.remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get() {
        let store = MemorySessionStore::new();
        store.put(1, "abc", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_value() {
        let store = MemorySessionStore::new();
        store.put(1, "old", Duration::from_secs(60)).await.unwrap();
        store.put(1, "new", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let store = MemorySessionStore::new();
        assert!(matches!(store.get(99).await, Err(AuthError::NotFound)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_not_found() {
        let store = MemorySessionStore::new();
        store.put(1, "abc", Duration::from_secs(5)).await.unwrap();

        tokio::time::advance(Duration::from_secs(6)).await;

        assert!(matches!(store.get(1).await, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemorySessionStore::new();
        store.put(1, "abc", Duration::from_secs(60)).await.unwrap();
        store.delete(1).await.unwrap();
        store.delete(1).await.unwrap();
        assert!(matches!(store.get(1).await, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_unavailable_is_distinct_from_not_found() {
        let store = MemorySessionStore::new();
        store.put(1, "abc", Duration::from_secs(60)).await.unwrap();
        store.set_unavailable(true);

        assert!(matches!(store.get(1).await, Err(AuthError::Unavailable(_))));
        assert!(matches!(
            store.put(1, "x", Duration::from_secs(60)).await,
            Err(AuthError::Unavailable(_))
        ));
        assert!(matches!(store.delete(1).await, Err(AuthError::Unavailable(_))));

        store.set_unavailable(false);
        assert_eq!(store.get(1).await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let store = MemorySessionStore::new();
        assert!(store.put(1, "abc", Duration::ZERO).await.is_err());
    }
}
