use std::time::Duration;

use coursekeep_auth::{TokenCodec, extract_bearer};
use coursekeep_config::JwtConfig;
use coursekeep_core::{AuthError, UserRole};

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes_only".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

fn codec() -> TokenCodec {
    TokenCodec::new(&get_test_jwt_config()).unwrap()
}

#[test]
fn test_issue_access_for_all_roles() {
    let codec = codec();
    let roles = vec![
        UserRole::Guest,
        UserRole::Student,
        UserRole::Employee,
        UserRole::Admin,
    ];

    for role in roles {
        let token = codec
            .issue_access(7, "test@example.com", role, codec.access_ttl())
            .unwrap();
        let claims = codec.parse_access(&token.token).unwrap();
        assert_eq!(claims.role, role);
    }
}

#[test]
fn test_parse_access_success() {
    let codec = codec();
    let token = codec
        .issue_access(42, "test@example.com", UserRole::Student, codec.access_ttl())
        .unwrap();

    let claims = codec.parse_access(&token.token).unwrap();

    assert_eq!(claims.email, "test@example.com");
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.user_id().unwrap(), 42);
    assert_eq!(claims.exp - claims.iat, 900);
}

#[test]
fn test_parse_access_invalid() {
    let result = codec().parse_access("invalid.token.here");
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[test]
fn test_parse_access_empty() {
    let result = codec().parse_access("");
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[test]
fn test_parse_access_wrong_secret() {
    let token = codec()
        .issue_access(1, "test@example.com", UserRole::Admin, Duration::from_secs(60))
        .unwrap();

    let other = TokenCodec::new(&JwtConfig {
        secret: "different_secret_key".to_string(),
        ..get_test_jwt_config()
    })
    .unwrap();

    assert!(matches!(
        other.parse_access(&token.token),
        Err(AuthError::InvalidToken)
    ));
}

#[test]
fn test_parse_access_tampered_payload() {
    let codec = codec();
    let token = codec
        .issue_access(1, "test@example.com", UserRole::Guest, Duration::from_secs(60))
        .unwrap();
    let admin = codec
        .issue_access(1, "test@example.com", UserRole::Admin, Duration::from_secs(60))
        .unwrap();

    // Guest signature over an admin payload.
    let guest_parts: Vec<&str> = token.token.split('.').collect();
    let admin_parts: Vec<&str> = admin.token.split('.').collect();
    let forged = format!("{}.{}.{}", guest_parts[0], admin_parts[1], guest_parts[2]);

    assert!(codec.parse_access(&forged).is_err());
}

#[test]
fn test_expired_access_token() {
    let codec = codec();
    let token = codec
        .issue_access(1, "test@example.com", UserRole::Guest, Duration::from_secs(1))
        .unwrap();

    std::thread::sleep(Duration::from_millis(2100));

    assert!(matches!(
        codec.parse_access(&token.token),
        Err(AuthError::InvalidToken)
    ));
}

#[test]
fn test_empty_secret_is_rejected() {
    for secret in ["", "   "] {
        let result = TokenCodec::new(&JwtConfig {
            secret: secret.to_string(),
            ..get_test_jwt_config()
        });
        assert!(matches!(result, Err(AuthError::Config(_))));
    }
}

#[test]
fn test_refresh_tokens_are_opaque_and_unique() {
    let codec = codec();
    let a = codec.issue_refresh(codec.refresh_ttl()).unwrap();
    let b = codec.issue_refresh(codec.refresh_ttl()).unwrap();

    assert_eq!(a.token.len(), 64);
    assert!(a.token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a.token, b.token);
    assert_eq!(a.ttl, Duration::from_secs(604800));
}

#[test]
fn test_issue_pair() {
    let codec = codec();
    let pair = codec
        .issue_pair(9, "pair@example.com", UserRole::Employee)
        .unwrap();

    assert_eq!(pair.access_token.ttl, Duration::from_secs(900));
    assert_eq!(pair.refresh_token.ttl, Duration::from_secs(604800));

    let claims = codec.parse_access(&pair.access_token.token).unwrap();
    assert_eq!(claims.user_id().unwrap(), 9);
    assert_eq!(claims.role, UserRole::Employee);

    // The refresh token is not an access token.
    assert!(codec.parse_access(&pair.refresh_token.token).is_err());
}

#[test]
fn test_extract_bearer() {
    assert_eq!(extract_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    assert_eq!(extract_bearer("bearer abc").unwrap(), "abc");

    for header in ["", "Bearer", "Bearer ", "Token abc", "Bearer a b"] {
        assert!(
            matches!(extract_bearer(header), Err(AuthError::MalformedHeader(_))),
            "accepted {:?}",
            header
        );
    }
}
