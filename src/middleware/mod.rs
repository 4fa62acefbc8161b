//! Middleware and extractors for request processing.
//!
//! # Modules
//!
//! - [`auth`]: The request gate: bearer token validation and route grants
//!
//! # Access levels
//!
//! 1. Public: no middleware
//! 2. Authenticated: [`auth::require_auth`], any valid access token
//! 3. Authenticated and authorized: [`auth::require_grant`], the token's role
//!    must be granted the matched route for the request method
//!
//! Credential failures (missing header, wrong scheme, bad or expired token)
//! answer 400; a refused grant answers 403.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, require_grant};
//!
//! let users = init_users_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_grant));
//!
//! async fn get_me(auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.user_id()?;
//!     // ...
//! }
//! ```

pub mod auth;
