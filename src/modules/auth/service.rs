use std::sync::{Arc, OnceLock};

use coursekeep_auth::{TokenCodec, TokenPair};
use coursekeep_cache::SessionStore;
use coursekeep_core::{AuthError, UserRole, hash_password, verify_password};
use coursekeep_db::UserRepository;
use coursekeep_models::{NewUser, RegisterRequest};
use coursekeep_observability::{
    track_login_failure, track_login_success, track_logout, track_refresh, track_tokens_issued,
    track_user_registered,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

/// Orchestrates registration, login, refresh and logout over the user store,
/// the token codec and the session registry.
///
/// Every step that can fail is checked before the next one runs: tokens are
/// only handed out once the session registry has accepted the new refresh
/// value.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    codec: Arc<TokenCodec>,
}

/// Compares digests so the comparison time does not depend on where the
/// presented value first differs from the stored one.
fn refresh_values_match(presented: &str, stored: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(stored.as_bytes())
}

/// Hash checked when the email is unknown, so that branch costs one bcrypt
/// verification like a wrong password does.
fn dummy_password_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("coursekeep-unknown-account").unwrap_or_default())
}

fn login_failure_reason(err: &AuthError) -> &'static str {
    match err {
        AuthError::InvalidCredentials => "invalid_credentials",
        AuthError::Unavailable(_) => "unavailable",
        _ => "internal",
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            users,
            sessions,
            codec,
        }
    }

    /// Creates a guest account. A role in the request is ignored.
    #[instrument(skip(self, request), fields(user.email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<i64, AuthError> {
        if self.users.exists_by_email(&request.email).await? {
            return Err(AuthError::AlreadyExists);
        }

        if let Some(requested) = request.role.filter(|r| *r != UserRole::LOWEST_ASSIGNABLE) {
            debug!(requested = %requested, "Ignoring requested role on self-registration");
        }

        let password_hash = hash_password(&request.password)?;

        let user_id = self
            .users
            .save(&NewUser {
                first_name: request.first_name,
                middle_name: request.middle_name,
                surname: request.surname,
                email: request.email,
                password_hash,
                phone: request.phone,
                role: UserRole::LOWEST_ASSIGNABLE,
            })
            .await?;

        track_user_registered();
        info!(user.id = user_id, "User registered");

        Ok(user_id)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let result = self.try_login(email, password).await;
        if let Err(e) = &result {
            track_login_failure(login_failure_reason(e));
        }
        result
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            let _ = verify_password(password, dummy_password_hash());
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.codec.issue_pair(user.id, &user.email, user.role)?;
        self.sessions
            .put(user.id, &pair.refresh_token.token, pair.refresh_token.ttl)
            .await?;

        track_login_success(user.role.as_str());
        track_tokens_issued();
        info!(user.id = user.id, "User logged in");

        Ok(pair)
    }

    /// Rotates the session: the presented refresh value is replaced by a new
    /// one and can never be used again.
    ///
    /// A missing, expired or mismatched session is [`AuthError::InvalidToken`];
    /// an unreachable registry is reported as [`AuthError::Unavailable`] so the
    /// client can retry instead of logging in again.
    #[instrument(skip(self, presented))]
    pub async fn refresh(&self, presented: &str, user_id: i64) -> Result<TokenPair, AuthError> {
        let result = self.try_refresh(presented, user_id).await;
        track_refresh(result.is_ok());
        result
    }

    async fn try_refresh(&self, presented: &str, user_id: i64) -> Result<TokenPair, AuthError> {
        self.check_session(presented, user_id).await?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let pair = self.codec.issue_pair(user.id, &user.email, user.role)?;
        self.sessions
            .put(user.id, &pair.refresh_token.token, pair.refresh_token.ttl)
            .await?;

        track_tokens_issued();
        info!(user.id = user.id, "Session refreshed");

        Ok(pair)
    }

    /// Ends the session if the presented refresh value is the current one.
    #[instrument(skip(self, presented))]
    pub async fn logout(&self, presented: &str, user_id: i64) -> Result<(), AuthError> {
        self.check_session(presented, user_id).await?;
        self.sessions.delete(user_id).await?;

        track_logout();
        info!(user.id = user_id, "User logged out");

        Ok(())
    }

    async fn check_session(&self, presented: &str, user_id: i64) -> Result<(), AuthError> {
        let stored = match self.sessions.get(user_id).await {
            Ok(stored) => stored,
            Err(AuthError::NotFound) => return Err(AuthError::InvalidToken),
            Err(e) => return Err(e),
        };

        if !refresh_values_match(presented, &stored) {
            warn!(user.id = user_id, "Refresh token does not match current session");
            return Err(AuthError::InvalidToken);
        }

        Ok(())
    }
}
