//! Cache key generation.

use crate::CacheConfig;

/// Key holding the live refresh token for `user_id`.
pub fn refresh_token(config: &CacheConfig, user_id: i64) -> String {
    config.prefixed_key(&format!("refresh_token:{}", user_id))
}
