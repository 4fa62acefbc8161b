use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::Response,
};
use coursekeep_auth::{AccessClaims, TokenCodec, extract_bearer};
use coursekeep_core::{AppError, AuthError, UserRole};
use coursekeep_observability::track_grant_denied;
use tracing::{debug, warn};

use crate::state::AppState;

/// Prefix under which every API route is mounted. Role files name routes
/// without it.
pub const API_PREFIX: &str = "/api/v1";

/// Extractor that validates the bearer token and provides the caller's claims.
///
/// Behind [`require_auth`] or [`require_grant`] the claims are taken from the
/// request extensions instead of being parsed a second time.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AccessClaims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.0.user_id()
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

/// Reads and verifies the bearer token. Every failure here is a 400: the
/// request itself is unusable, whatever the reason.
fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<AccessClaims, AppError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::MalformedHeader("missing authorization header".to_string()))
        .and_then(|value| {
            value.to_str().map_err(|_| {
                AuthError::MalformedHeader("authorization header is not ASCII".to_string())
            })
        })
        .map_err(AppError::bad_request)?;

    let token = extract_bearer(header_value).map_err(AppError::bad_request)?;

    codec.parse_access(token).map_err(AppError::bad_request)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<AccessClaims>() {
            return Ok(AuthUser(claims.clone()));
        }

        authenticate(&parts.headers, &state.codec).map(AuthUser)
    }
}

/// Lets the request through only with a valid access token.
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/logout", post(logout))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), &state.codec)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Lets the request through only if the token's role is granted the matched
/// route for the request method.
///
/// The route key is the matched route template with [`API_PREFIX`] removed,
/// so `/api/v1/users/me` is checked as `/users/me`. A denial and an unknown
/// role both answer 403.
pub async fn require_grant(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), &state.codec)?;

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let route = path.strip_prefix(API_PREFIX).unwrap_or(&path);
    let role = claims.role.as_str();

    match state.roles.grant(role, req.method().as_str(), route) {
        Ok(true) => {}
        Ok(false) => {
            track_grant_denied(role);
            debug!(role = %role, method = %req.method(), route = %route, "Grant denied");
            return Err(AppError::forbidden("access is denied".to_string()));
        }
        Err(e) => {
            track_grant_denied(role);
            warn!(error = %e, method = %req.method(), route = %route, "Grant check failed");
            return Err(AppError::new(StatusCode::FORBIDDEN, AuthError::Forbidden));
        }
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursekeep_config::JwtConfig;
    use std::time::Duration;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(&JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 3600,
        })
        .unwrap()
    }

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization.parse().unwrap());
        headers
    }

    #[test]
    fn test_authenticate_valid_token() {
        let codec = codec("gate-secret");
        let token = codec
            .issue_access(5, "a@x.com", UserRole::Student, Duration::from_secs(60))
            .unwrap();

        let claims = authenticate(&headers(&format!("Bearer {}", token.token)), &codec).unwrap();
        assert_eq!(claims.user_id().unwrap(), 5);
        assert_eq!(claims.role, UserRole::Student);
    }

    #[test]
    fn test_authenticate_missing_header_is_bad_request() {
        let err = authenticate(&HeaderMap::new(), &codec("gate-secret")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authenticate_wrong_scheme_is_bad_request() {
        let err = authenticate(&headers("Token abc"), &codec("gate-secret")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authenticate_foreign_token_is_bad_request() {
        let token = codec("other-secret")
            .issue_access(5, "a@x.com", UserRole::Admin, Duration::from_secs(60))
            .unwrap();

        let err = authenticate(
            &headers(&format!("Bearer {}", token.token)),
            &codec("gate-secret"),
        )
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
