//! In-process user store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use coursekeep_core::AuthError;
use coursekeep_models::{NewUser, User};
use tokio::sync::RwLock;

use crate::repository::UserRepository;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    users: HashMap<i64, User>,
}

/// User store backed by a map. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    inner: RwLock<Inner>,
    unavailable: AtomicBool,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every call fails with [`AuthError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AuthError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::Unavailable("user store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        self.check_available()?;
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: &NewUser) -> Result<i64, AuthError> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::AlreadyExists);
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.users.insert(
            id,
            User {
                id,
                first_name: user.first_name.clone(),
                middle_name: user.middle_name.clone(),
                surname: user.surname.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                phone: user.phone.clone(),
                role: user.role,
            },
        );

        Ok(id)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
