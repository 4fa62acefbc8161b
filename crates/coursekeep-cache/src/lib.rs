//! # Coursekeep Cache
//!
//! The session registry: the single place where a refresh token is bound to a
//! user.
//!
//! This crate provides:
//! - [`SessionStore`], the registry contract (`put` / `get` / `delete`)
//! - [`RedisSessionStore`], the networked implementation
//! - [`MemorySessionStore`], an in-process implementation with the same semantics
//! - Cache configuration from environment variables
//! - Cache key generation
//!
//! # Single-session policy
//!
//! There is exactly one key per user. `put` overwrites whatever was there, so
//! issuing a new refresh token makes the previous one unusable immediately,
//! whatever TTL it had left.
//!
//! # Example
//!
//! ```ignore
//! use coursekeep_cache::{CacheConfig, RedisSessionStore, SessionStore};
//!
//! let config = CacheConfig::from_env();
//! let sessions = RedisSessionStore::connect(&config).await?;
//!
//! sessions.put(42, &refresh_token, Duration::from_secs(604800)).await?;
//! let current = sessions.get(42).await?;
//! sessions.delete(42).await?;
//! ```

pub mod config;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod store;

pub use config::{CacheConfig, SessionBackend};
pub use memory::MemorySessionStore;
pub use self::redis::RedisSessionStore;
pub use store::SessionStore;
