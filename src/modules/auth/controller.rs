use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use coursekeep_core::AppError;
use coursekeep_models::{
    LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    RegisterResponse, TokenResponse,
};
use tracing::instrument;
use utoipa::ToSchema;

use super::cookie::{expired_refresh_cookie, presented_refresh_token, refresh_cookie};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new guest account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 503, description = "User store unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let user_id = state.auth.register(dto).await?;

    Ok(Json(RegisterResponse {
        message: "user registered successfully".to_string(),
        user_id,
    }))
}

/// Log in with email and password
///
/// Returns the access token in the body and sets the `RefreshToken` cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 503, description = "Session registry unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pair = state.auth.login(&dto.email, &dto.password).await?;

    let cookie = refresh_cookie(
        &pair.refresh_token.token,
        pair.refresh_token.ttl,
        state.server_config.cookie_secure,
    );

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            message: "logged in successfully".to_string(),
            token: pair.access_token.token,
        }),
    ))
}

/// Exchange the `RefreshToken` cookie for a new token pair
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenResponse),
        (status = 400, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 401, description = "Refresh token missing, expired or superseded", body = ErrorResponse),
        (status = 503, description = "Session registry unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn refresh_token(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let presented = presented_refresh_token(&jar)?;
    let pair = state.auth.refresh(&presented, dto.user_id).await?;

    let cookie = refresh_cookie(
        &pair.refresh_token.token,
        pair.refresh_token.ttl,
        state.server_config.cookie_secure,
    );

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            message: "token refreshed successfully".to_string(),
            token: pair.access_token.token,
        }),
    ))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 400, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 401, description = "Refresh token missing or not current", body = ErrorResponse),
        (status = 503, description = "Session registry unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn logout(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LogoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let presented = presented_refresh_token(&jar)?;
    state.auth.logout(&presented, dto.user_id).await?;

    let cookie = expired_refresh_cookie(state.server_config.cookie_secure);

    Ok((
        jar.add(cookie),
        Json(MessageResponse {
            message: "logged out successfully".to_string(),
        }),
    ))
}
