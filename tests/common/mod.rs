#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use coursekeep::router::init_router;
use coursekeep::state::AppState;
use coursekeep_auth::TokenCodec;
use coursekeep_cache::MemorySessionStore;
use coursekeep_config::{CorsConfig, JwtConfig, ServerConfig};
use coursekeep_db::MemoryUserRepository;
use coursekeep_rbac::RoleManager;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";
pub const TEST_PASSWORD: &str = "longenough1";

/// Guests may read their own profile; admins may also refresh and log out.
/// Students have no GET permission at all.
pub const TEST_ROLES: &str = r#"{
    "roles": [
        {"name": "guest", "permissions": [
            {"method": "GET", "routes": ["/users/me"]}
        ]},
        {"name": "student", "permissions": [
            {"method": "POST", "routes": ["/auth/logout"]}
        ]},
        {"name": "admin", "permissions": [
            {"method": "GET", "routes": ["/users/me"]},
            {"method": "POST", "routes": ["/auth/logout", "/auth/refresh-token"]}
        ]}
    ]
}"#;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserRepository>,
    pub sessions: Arc<MemorySessionStore>,
    pub codec: Arc<TokenCodec>,
}

pub fn setup_test_app() -> TestApp {
    let users = Arc::new(MemoryUserRepository::new());
    let sessions = Arc::new(MemorySessionStore::new());
    let codec = Arc::new(TokenCodec::new(&test_jwt_config()).unwrap());
    let roles = Arc::new(RoleManager::from_json(TEST_ROLES).unwrap());

    let state = AppState::new(
        users.clone(),
        sessions.clone(),
        codec.clone(),
        roles,
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        ServerConfig::default(),
    );

    TestApp {
        router: init_router(state),
        users,
        sessions,
        codec,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_request(
    method: &str,
    uri: &str,
    access_token: &str,
    refresh_token: Option<&str>,
    body: Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", access_token));
    if let Some(refresh) = refresh_token {
        builder = builder.header(header::COOKIE, format!("RefreshToken={}", refresh));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Value of the `RefreshToken` cookie in the response's `Set-Cookie` header.
pub fn refresh_cookie_value(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    pair.strip_prefix("RefreshToken=").map(str::to_string)
}

pub fn register_body(email: &str) -> Value {
    json!({
        "first_name": "Ada",
        "middle_name": "B",
        "surname": "Lovelace",
        "email": email,
        "password": TEST_PASSWORD,
        "phone": "+15550100123"
    })
}

pub struct LoggedIn {
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Registers a fresh user over HTTP and logs it in.
pub async fn register_and_login(app: &TestApp) -> LoggedIn {
    let email = generate_unique_email();

    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/v1/auth/register", register_body(&email)))
        .await
        .unwrap();
    let user_id = body_json(response).await["user_id"].as_i64().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({"email": email, "password": TEST_PASSWORD}),
        ))
        .await
        .unwrap();
    let refresh_token = refresh_cookie_value(&response).unwrap();
    let access_token = body_json(response).await["token"].as_str().unwrap().to_string();

    LoggedIn {
        user_id,
        access_token,
        refresh_token,
    }
}
