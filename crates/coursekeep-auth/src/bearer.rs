//! `Authorization` header parsing.

use coursekeep_core::AuthError;

const BEARER_SCHEME: &str = "Bearer";

/// Extracts the raw token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. The token must be a single
/// non-empty run of non-whitespace characters.
pub fn extract_bearer(header_value: &str) -> Result<&str, AuthError> {
    let value = header_value.trim();
    if value.is_empty() {
        return Err(AuthError::MalformedHeader(
            "missing authorization header".to_string(),
        ));
    }

    let (scheme, token) = value.split_once(' ').ok_or_else(|| {
        AuthError::MalformedHeader("incorrectly formatted authorization header".to_string())
    })?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::MalformedHeader(
            "authorization scheme must be Bearer".to_string(),
        ));
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::MalformedHeader(
            "incorrectly formatted authorization header".to_string(),
        ));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(extract_bearer("bearer abc").unwrap(), "abc");
        assert_eq!(extract_bearer("  BEARER   abc  ").unwrap(), "abc");
    }

    #[test]
    fn test_rejects_malformed() {
        for header in ["", "   ", "Bearer", "Bearer ", "Token abc", "Basic dXNlcjpwYXNz", "Bearer a b"] {
            assert!(
                matches!(extract_bearer(header), Err(AuthError::MalformedHeader(_))),
                "accepted {:?}",
                header
            );
        }
    }
}
