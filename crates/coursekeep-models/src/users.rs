//! User domain models.

use coursekeep_core::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user account as held by the user store.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
}

/// A user ready to be inserted: password already hashed, role already decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
}
