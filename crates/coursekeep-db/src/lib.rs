//! # Coursekeep DB
//!
//! Database pool and the user store for the Coursekeep API.
//!
//! The auth service only talks to the [`UserRepository`] trait.
//! [`PgUserRepository`] is the PostgreSQL implementation used in production;
//! [`MemoryUserRepository`] backs tests and local development.
//!
//! # Example
//!
//! ```ignore
//! use coursekeep_db::{init_db_pool, run_migrations, PgUserRepository};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! let users = PgUserRepository::new(pool);
//! ```

use std::env;
use std::time::Duration;

use coursekeep_core::AuthError;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
pub use repository::UserRepository;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// # Errors
///
/// [`AuthError::Config`] when `DATABASE_URL` is unset, and
/// [`AuthError::Unavailable`] when the database cannot be reached.
pub async fn init_db_pool() -> Result<PgPool, AuthError> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| AuthError::Config("DATABASE_URL must be set".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .map_err(|e| AuthError::Unavailable(format!("failed to connect to database: {}", e)))?;

    info!("Database pool initialized");

    Ok(pool)
}

/// Applies the migrations under `migrations/` at the workspace root.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AuthError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AuthError::Internal(format!("migration failed: {}", e)))
}
