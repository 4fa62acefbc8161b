//! The `RefreshToken` cookie.
//!
//! The refresh value only ever travels in this cookie: `HttpOnly` keeps it
//! away from scripts and `SameSite=Lax` keeps it off cross-site subrequests.

use std::time::Duration;

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use coursekeep_core::AuthError;

pub const REFRESH_COOKIE: &str = "RefreshToken";

fn build(value: String, max_age: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(secure)
        .build()
}

/// Cookie carrying a refresh token for `ttl`.
pub fn refresh_cookie(value: &str, ttl: Duration, secure: bool) -> Cookie<'static> {
    let max_age = time::Duration::try_from(ttl).unwrap_or(time::Duration::MAX);
    build(value.to_string(), max_age, secure)
}

/// Cookie that makes the client drop the refresh cookie.
pub fn expired_refresh_cookie(secure: bool) -> Cookie<'static> {
    build(String::new(), time::Duration::ZERO, secure)
}

/// The presented refresh value; a missing or empty cookie is an invalid token.
pub fn presented_refresh_token(jar: &CookieJar) -> Result<String, AuthError> {
    jar.get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::InvalidToken)
}
