//! # Coursekeep Auth
//!
//! Credential codec for the Coursekeep API. Pure: no network or storage access.
//!
//! This crate provides:
//!
//! - [`claims`]: The access token claim set
//! - [`jwt`]: [`TokenCodec`], which issues and parses access tokens and mints
//!   opaque refresh tokens
//! - [`bearer`]: `Authorization: Bearer <token>` header parsing
//!
//! # Token Types
//!
//! - **Access Token** ([`AccessClaims`]): short-lived HS256 JWT carrying user id,
//!   email and role. Valid purely by signature and expiry.
//! - **Refresh Token**: 256-bit random hex string. It carries no identity; the
//!   session registry is the only place it is tied to a user.
//!
//! # Example
//!
//! ```ignore
//! use coursekeep_auth::{TokenCodec, extract_bearer};
//! use coursekeep_config::JwtConfig;
//!
//! let codec = TokenCodec::new(&JwtConfig::from_env())?;
//! let pair = codec.issue_pair(42, "a@x.com", UserRole::Guest)?;
//!
//! let raw = extract_bearer("Bearer eyJ...")?;
//! let claims = codec.parse_access(raw)?;
//! ```

pub mod bearer;
pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use bearer::extract_bearer;
pub use claims::AccessClaims;
pub use jwt::{IssuedToken, TokenCodec, TokenPair};
