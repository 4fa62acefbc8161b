use coursekeep_core::UserRole;
use coursekeep_models::{
    LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    RegisterResponse, TokenResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::controller::ProfileResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout,
        crate::modules::users::controller::get_me,
    ),
    components(
        schemas(
            UserRole,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            TokenResponse,
            RefreshTokenRequest,
            LogoutRequest,
            MessageResponse,
            ProfileResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and session endpoints"),
        (name = "Users", description = "Endpoints guarded by role grants")
    ),
    info(
        title = "Coursekeep API",
        version = "0.1.0",
        description = "Authentication and route authorization service. Access tokens are short-lived JWTs; the refresh token travels in the HttpOnly `RefreshToken` cookie.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
