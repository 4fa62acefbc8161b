//! PostgreSQL user store.

use async_trait::async_trait;
use coursekeep_core::{AuthError, UserRole};
use coursekeep_models::{NewUser, User};
use sqlx::PgPool;
use tracing::{error, instrument};

use crate::repository::UserRepository;

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    middle_name: String,
    surname: String,
    email: String,
    password: String,
    phone: String,
    role: i16,
}

impl TryFrom<UserRow> for User {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            first_name: row.first_name,
            middle_name: row.middle_name,
            surname: row.surname,
            email: row.email,
            password_hash: row.password,
            phone: row.phone,
            role: UserRole::from_i16(row.role)?,
        })
    }
}

/// Maps driver errors: pool and I/O failures mean the store is unreachable,
/// anything else is an internal fault.
fn map_sqlx_error(e: sqlx::Error) -> AuthError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AuthError::AlreadyExists,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            error!(error = %e, "User store unavailable");
            AuthError::Unavailable(format!("user store: {}", e))
        }
        sqlx::Error::RowNotFound => AuthError::NotFound,
        _ => AuthError::Internal(format!("user store: {}", e)),
    }
}

const USER_COLUMNS: &str =
    "id, first_name, middle_name, surname, email, password, phone, role";

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self, user), fields(user.email = %user.email))]
    async fn save(&self, user: &NewUser) -> Result<i64, AuthError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (first_name, middle_name, surname, email, password, phone, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&user.first_name)
        .bind(&user.middle_name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(user.role.as_i16())
        .fetch_one(&self.db)
        .await
        .map_err(map_sqlx_error)
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.db)
            .await
            .map_err(map_sqlx_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            AuthError::Unavailable(_)
        ));
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            AuthError::NotFound
        ));
    }

    #[test]
    fn test_row_with_unknown_role_is_rejected() {
        let row = UserRow {
            id: 1,
            first_name: "A".into(),
            middle_name: "B".into(),
            surname: "C".into(),
            email: "a@x.com".into(),
            password: "hash".into(),
            phone: "+15550100123".into(),
            role: 42,
        };
        assert!(User::try_from(row).is_err());
    }

    // Requires a PostgreSQL instance at DATABASE_URL.
    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_duplicate_email_is_already_exists() {
        let pool = crate::init_db_pool().await.unwrap();
        crate::run_migrations(&pool).await.unwrap();
        let repo = PgUserRepository::new(pool);

        let user = NewUser {
            first_name: "A".into(),
            middle_name: "B".into(),
            surname: "C".into(),
            email: format!("dup-{}@example.com", std::process::id()),
            password_hash: "hash".into(),
            phone: "+15550100123".into(),
            role: UserRole::Guest,
        };

        let id = repo.save(&user).await.unwrap();
        assert!(matches!(repo.save(&user).await, Err(AuthError::AlreadyExists)));
        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().role, UserRole::Guest);
        assert!(repo.exists_by_email(&user.email).await.unwrap());
    }
}
