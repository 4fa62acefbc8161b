//! Authentication request and response bodies.
//!
//! The refresh token never appears in these bodies; it travels in the
//! `RefreshToken` cookie.

use coursekeep_core::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Accepts E.164-style numbers: a leading `+` and 8 to 15 digits.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or("");
    if (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("phone must be in E.164 format".into());
        Err(err)
    }
}

/// Self-registration payload.
///
/// `role` is accepted for compatibility with older clients but ignored: every
/// self-registered account starts as a guest.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "middle_name is required"))]
    pub middle_name: String,
    #[validate(length(min = 1, message = "surname is required"))]
    pub surname: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "longenough1")]
    pub password: String,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "+15550100123")]
    pub phone: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "longenough1")]
    pub password: String,
}

/// Body of login and refresh responses. `token` is the access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LogoutRequest {
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
