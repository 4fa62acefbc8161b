//! JWT claim structure for access tokens.

use coursekeep_core::{AuthError, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// These claims are embedded in access tokens and provide everything needed
/// for authentication and authorization without a storage lookup. The role is
/// a snapshot taken at issue time; a role change becomes visible only after the
/// next login or refresh.
///
/// # Fields
///
/// - `sub`: User ID (subject), decimal string
/// - `email`: User's email address
/// - `role`: Role tag at issue time
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role tag the token was issued for
    pub role: UserRole,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: u64,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: u64,
}

impl AccessClaims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}
