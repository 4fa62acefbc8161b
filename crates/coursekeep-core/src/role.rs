//! The fixed account role enumeration.
//!
//! Roles are stored as their discriminant in the user table and travel as
//! snake_case names inside access tokens, which are also the role names used
//! in the role definition file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AuthError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Unspecified,
    Guest,
    Student,
    Employee,
    Admin,
}

impl UserRole {
    /// Role given to every self-registered account.
    pub const LOWEST_ASSIGNABLE: UserRole = UserRole::Guest;

    /// Every role an account can actually hold.
    pub const ASSIGNABLE: [UserRole; 4] = [
        UserRole::Guest,
        UserRole::Student,
        UserRole::Employee,
        UserRole::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Unspecified => "unspecified",
            UserRole::Guest => "guest",
            UserRole::Student => "student",
            UserRole::Employee => "employee",
            UserRole::Admin => "admin",
        }
    }

    pub fn as_i16(&self) -> i16 {
        match self {
            UserRole::Unspecified => 0,
            UserRole::Guest => 1,
            UserRole::Student => 2,
            UserRole::Employee => 3,
            UserRole::Admin => 4,
        }
    }

    pub fn from_i16(value: i16) -> Result<Self, AuthError> {
        match value {
            0 => Ok(UserRole::Unspecified),
            1 => Ok(UserRole::Guest),
            2 => Ok(UserRole::Student),
            3 => Ok(UserRole::Employee),
            4 => Ok(UserRole::Admin),
            other => Err(AuthError::Internal(format!("unknown role id {}", other))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unspecified" => Ok(UserRole::Unspecified),
            "guest" => Ok(UserRole::Guest),
            "student" => Ok(UserRole::Student),
            "employee" => Ok(UserRole::Employee),
            "admin" => Ok(UserRole::Admin),
            other => Err(AuthError::RoleNotFound(other.to_string())),
        }
    }
}
