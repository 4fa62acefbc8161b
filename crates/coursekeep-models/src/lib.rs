//! # Coursekeep Models
//!
//! Domain models and DTOs for the Coursekeep API.
//!
//! # Modules
//!
//! - [`auth`]: Request and response bodies of the auth endpoints
//! - [`users`]: The identity record and its insert form
//!
//! # Example
//!
//! ```ignore
//! use coursekeep_models::{LoginRequest, RegisterRequest, User};
//! ```

pub mod auth;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    RegisterResponse, TokenResponse,
};
pub use users::{NewUser, User};
