//! Error types for the Coursekeep API.
//!
//! Two layers live here:
//!
//! - [`AuthError`]: the domain taxonomy returned by the token codec, session
//!   registry, authorization engine and auth service.
//! - [`AppError`]: the HTTP-facing error carrying a status code, rendered as
//!   `{"error": "<message>"}`.
//!
//! Every `AuthError` converts into an `AppError` with a fixed status, so handlers
//! can use `?` directly on service results.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Domain errors of the authentication and authorization subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Fatal startup misconfiguration (empty signing secret, bad role file).
    #[error("configuration error: {0}")]
    Config(String),

    /// Unknown email or wrong password. Deliberately carries no detail.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("user already exists")]
    AlreadyExists,

    /// Access or refresh credential is absent, mismatched, expired or badly signed.
    #[error("invalid token")]
    InvalidToken,

    /// The `Authorization` header is missing or not a bearer header.
    #[error("malformed authorization header: {0}")]
    MalformedHeader(String),

    /// The role named in the credential is not in the role table.
    #[error("role not found: {0}")]
    RoleNotFound(String),

    /// The role exists but is not granted the route.
    #[error("access is denied")]
    Forbidden,

    /// No record for the requested key.
    #[error("not found")]
    NotFound,

    /// The session registry or user store could not be reached in time.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status this error maps to at the API boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Config(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::InvalidCredentials | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::AlreadyExists => StatusCode::CONFLICT,
            AuthError::MalformedHeader(_) => StatusCode::BAD_REQUEST,
            AuthError::RoleNotFound(_) | AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = err.status();
        match &err {
            AuthError::Internal(_) | AuthError::Config(_) | AuthError::Unavailable(_) => {
                tracing::error!(error = %err, "request failed");
            }
            _ => {}
        }
        Self::new(status, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Internal causes may carry driver messages; keep them out of the body.
        let message = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::AlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::MalformedHeader("missing".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::RoleNotFound("ghost".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Unavailable("redis".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Config("empty secret".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unavailable_is_not_invalid_token() {
        let err: AppError = AuthError::Unavailable("timeout".into()).into();
        assert_ne!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
    }

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_body_is_redacted() {
        let response =
            AppError::from(AuthError::Internal("pool timed out at 10.0.0.3".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body, json!({"error": "internal server error"}));
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn test_client_error_body_carries_message() {
        let response = AppError::from(AuthError::AlreadyExists).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_of(response).await, json!({"error": "user already exists"}));
    }
}
