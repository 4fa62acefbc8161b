use axum::Json;
use coursekeep_core::{AppError, UserRole};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

/// Get the caller's identity as carried by the access token
///
/// The role shown is the one the token was issued with.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Caller identity", body = ProfileResponse),
        (status = 400, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Role not allowed on this route", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(auth_user))]
pub async fn get_me(auth_user: AuthUser) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(ProfileResponse {
        user_id: auth_user.user_id()?,
        email: auth_user.email().to_string(),
        role: auth_user.role(),
    }))
}
