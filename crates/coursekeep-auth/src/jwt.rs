//! Access and refresh credential issuance.
//!
//! [`TokenCodec`] is built once at startup from [`JwtConfig`] and shared by
//! reference. It signs access tokens with HS256 and only ever accepts HS256 on
//! the way back in, so a token whose header names another algorithm is rejected
//! before its signature is looked at.
//!
//! # Example
//!
//! ```ignore
//! let codec = TokenCodec::new(&jwt_config)?;
//!
//! let access = codec.issue_access(user_id, "user@example.com", UserRole::Student, ttl)?;
//! let claims = codec.parse_access(&access.token)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use rand::rngs::OsRng;

use coursekeep_config::JwtConfig;
use coursekeep_core::{AuthError, UserRole};

use crate::claims::AccessClaims;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Refresh tokens are this many random bytes, hex encoded.
const REFRESH_TOKEN_BYTES: usize = 32;

/// A freshly issued credential and the lifetime it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub ttl: Duration,
}

/// Access and refresh credentials issued together at login or refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &SIGNING_ALGORITHM)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Builds the codec from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the secret is empty. This is a startup
    /// failure; the server must not come up without a signing secret.
    pub fn new(jwt_config: &JwtConfig) -> Result<Self, AuthError> {
        if jwt_config.secret.trim().is_empty() {
            return Err(AuthError::Config("empty secret key".to_string()));
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let secret = jwt_config.secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_ttl: jwt_config.access_ttl(),
            refresh_ttl: jwt_config.refresh_ttl(),
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Creates a signed access token valid for `ttl` from now.
    pub fn issue_access(
        &self,
        user_id: i64,
        email: &str,
        role: UserRole,
        ttl: Duration,
    ) -> Result<IssuedToken, AuthError> {
        let now = Utc::now().timestamp().max(0) as u64;

        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            exp: now.saturating_add(ttl.as_secs()),
            iat: now,
        };

        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken { token, ttl })
    }

    /// Mints an opaque refresh token from the OS random source.
    ///
    /// The value carries no identity. Binding it to a user is the session
    /// registry's job.
    pub fn issue_refresh(&self, ttl: Duration) -> Result<IssuedToken, AuthError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AuthError::Internal(format!("Failed to create refresh token: {}", e)))?;

        Ok(IssuedToken {
            token: hex::encode(bytes),
            ttl,
        })
    }

    /// Issues an access/refresh pair with the configured lifetimes.
    pub fn issue_pair(
        &self,
        user_id: i64,
        email: &str,
        role: UserRole,
    ) -> Result<TokenPair, AuthError> {
        let access_token = self.issue_access(user_id, email, role, self.access_ttl)?;
        let refresh_token = self.issue_refresh(self.refresh_ttl)?;

        if access_token.token.is_empty() || refresh_token.token.is_empty() {
            return Err(AuthError::Internal("issued an empty token".to_string()));
        }

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verifies an access token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if:
    /// - the signature does not verify against the server secret
    /// - the header names an algorithm other than HS256
    /// - `exp` has passed (no leeway)
    /// - required claims are missing or malformed
    pub fn parse_access(&self, raw: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(raw, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "access token rejected");
                AuthError::InvalidToken
            })
    }
}
