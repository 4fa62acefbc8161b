//! # Coursekeep Config
//!
//! Configuration types for the Coursekeep API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing secret and credential lifetimes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`rbac`]: Location of the role definition file
//! - [`server`]: Listen address and cookie settings
//!
//! Each config is built once at startup and passed explicitly into the
//! components that need it.
//!
//! # Example
//!
//! ```ignore
//! use coursekeep_config::{CorsConfig, JwtConfig, RbacConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let rbac_config = RbacConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rbac;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rbac::RbacConfig;
pub use server::ServerConfig;
