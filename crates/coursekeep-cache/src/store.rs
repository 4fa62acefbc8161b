use std::time::Duration;

use async_trait::async_trait;
use coursekeep_core::AuthError;

/// Maps a user id to its one live refresh token.
///
/// # Error contract
///
/// - `get` returns [`AuthError::NotFound`] when there is no entry or it expired.
/// - A backend that cannot be reached, or does not answer within its deadline,
///   returns [`AuthError::Unavailable`]. Implementations never report an outage
///   as `NotFound`: a cache blip must not look like a logout.
///
/// No method retries. A `put` whose deadline fires after the write landed is
/// safe to repeat with the same value.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Unconditional upsert; the previous value for `user_id` becomes invalid.
    async fn put(&self, user_id: i64, refresh_token: &str, ttl: Duration)
    -> Result<(), AuthError>;

    async fn get(&self, user_id: i64) -> Result<String, AuthError>;

    /// Idempotent: deleting an absent entry succeeds.
    async fn delete(&self, user_id: i64) -> Result<(), AuthError>;
}

/// Redis `SET EX` only takes whole seconds and rejects zero.
pub(crate) fn ttl_seconds(ttl: Duration) -> Result<u64, AuthError> {
    match ttl.as_secs() {
        0 => Err(AuthError::Internal(
            "session ttl must be at least one second".to_string(),
        )),
        secs => Ok(secs),
    }
}
