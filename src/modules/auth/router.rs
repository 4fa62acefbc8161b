use axum::{Router, middleware, routing::post};

use super::controller::{login, logout, refresh_token, register};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(authenticated)
}
