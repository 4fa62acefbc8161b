//! Session registry configuration.
//!
//! This module provides configuration for the Redis connection and the
//! registry backend, loaded from environment variables.

use std::env;
use std::time::Duration;

/// Which [`SessionStore`](crate::SessionStore) implementation the server uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    /// In-process map. Sessions do not survive a restart and are not shared
    /// between instances; intended for local development.
    Memory,
}

/// Session registry configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_PREFIX`: Prefix for all cache keys (default: `coursekeep`)
/// - `CACHE_TIMEOUT_MS`: Upper bound for a single registry call (default: `2000`)
/// - `SESSION_BACKEND`: `redis` or `memory` (default: `redis`)
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Redis connection URL.
    pub redis_url: String,

    /// Prefix for all cache keys to avoid collisions.
    pub key_prefix: String,

    /// Deadline applied to every connect, read and write.
    pub operation_timeout: Duration,

    pub backend: SessionBackend,
}

impl CacheConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| "coursekeep".into()),
            operation_timeout: Duration::from_millis(
                env::var("CACHE_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2000),
            ),
            backend: match env::var("SESSION_BACKEND").as_deref() {
                Ok("memory") => SessionBackend::Memory,
                _ => SessionBackend::Redis,
            },
        }
    }

    /// Build a prefixed cache key.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = CacheConfig::default();
    /// let key = config.prefixed_key("refresh_token:42");
    /// // Returns "coursekeep:refresh_token:42"
    /// ```
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "coursekeep".into(),
            operation_timeout: Duration::from_millis(2000),
            backend: SessionBackend::Redis,
        }
    }
}
