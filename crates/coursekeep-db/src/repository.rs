use async_trait::async_trait;
use coursekeep_core::AuthError;
use coursekeep_models::{NewUser, User};

/// The user store as seen by the auth service.
///
/// Lookups that find nothing return `Ok(None)`; [`AuthError::Unavailable`] is
/// reserved for the store itself being unreachable.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;

    /// Inserts the user and returns its id.
    ///
    /// A duplicate email yields [`AuthError::AlreadyExists`].
    async fn save(&self, user: &NewUser) -> Result<i64, AuthError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError>;
}
