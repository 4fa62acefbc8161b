//! Redis-backed session registry.
//!
//! Each user has one string key (`<prefix>:refresh_token:<user_id>`) written with
//! `SET ... EX`, so Redis expiry and overwrite give the TTL and single-session
//! behaviour directly.

use std::future::Future;
use std::time::Duration;

use ::redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use async_trait::async_trait;
use coursekeep_core::AuthError;
use tracing::{debug, error, instrument};

use crate::config::CacheConfig;
use crate::keys;
use crate::store::{SessionStore, ttl_seconds};

/// Redis session registry with a shared, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    config: CacheConfig,
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("key_prefix", &self.config.key_prefix)
            .field("operation_timeout", &self.config.operation_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisSessionStore {
    /// Opens the connection manager.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] for an unparsable URL and
    /// [`AuthError::Unavailable`] if Redis cannot be reached within the
    /// configured timeout.
    pub async fn connect(config: &CacheConfig) -> Result<Self, AuthError> {
        let client = Client::open(config.redis_url.as_str())
            .map_err(|e| AuthError::Config(format!("invalid REDIS_URL: {}", e)))?;

        let conn = bounded(config.operation_timeout, ConnectionManager::new(client)).await?;

        Ok(Self {
            conn,
            config: config.clone(),
        })
    }
}

/// Runs a Redis call under `timeout`; both the deadline and driver errors
/// become `Unavailable`.
async fn bounded<T, F>(timeout: Duration, fut: F) -> Result<T, AuthError>
where
    F: Future<Output = Result<T, RedisError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!(error = %e, "Redis error");
            Err(AuthError::Unavailable(format!("session registry: {}", e)))
        }
        Err(_) => {
            error!(timeout_ms = %timeout.as_millis(), "Redis call timed out");
            Err(AuthError::Unavailable(
                "session registry timed out".to_string(),
            ))
        }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip(self, refresh_token), fields(cache.operation = "SETEX"))]
    async fn put(
        &self,
        user_id: i64,
        refresh_token: &str,
        ttl: Duration,
    ) -> Result<(), AuthError> {
        let seconds = ttl_seconds(ttl)?;
        let key = keys::refresh_token(&self.config, user_id);
        let mut conn = self.conn.clone();

        bounded(
            self.config.operation_timeout,
            conn.set_ex::<_, _, ()>(&key, refresh_token, seconds),
        )
        .await?;

        debug!(cache.key = %key, cache.ttl_secs = %seconds, "Session stored");

        Ok(())
    }

    #[instrument(skip(self), fields(cache.operation = "GET"))]
    async fn get(&self, user_id: i64) -> Result<String, AuthError> {
        let key = keys::refresh_token(&self.config, user_id);
        let mut conn = self.conn.clone();

        let value: Option<String> =
            bounded(self.config.operation_timeout, conn.get(&key)).await?;

        match value {
            Some(value) => {
                debug!(cache.key = %key, "Session hit");
                Ok(value)
            }
            None => {
                debug!(cache.key = %key, "Session miss");
                Err(AuthError::NotFound)
            }
        }
    }

    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    async fn delete(&self, user_id: i64) -> Result<(), AuthError> {
        let key = keys::refresh_token(&self.config, user_id);
        let mut conn = self.conn.clone();

        bounded(self.config.operation_timeout, conn.del::<_, ()>(&key)).await?;

        debug!(cache.key = %key, "Session deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a running Redis instance.

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_put_overwrites_and_delete_is_idempotent() {
        let config = CacheConfig {
            key_prefix: "coursekeep-test".into(),
            ..CacheConfig::default()
        };
        let store = RedisSessionStore::connect(&config).await.unwrap();

        store.put(1, "first", Duration::from_secs(60)).await.unwrap();
        store.put(1, "second", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), "second");

        store.delete(1).await.unwrap();
        store.delete(1).await.unwrap();
        assert!(matches!(store.get(1).await, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_unavailable() {
        let config = CacheConfig {
            redis_url: "redis://127.0.0.1:1".into(),
            operation_timeout: Duration::from_millis(200),
            ..CacheConfig::default()
        };

        let result = RedisSessionStore::connect(&config).await;
        assert!(matches!(result, Err(AuthError::Unavailable(_))));
    }
}
