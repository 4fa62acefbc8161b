//! # Coursekeep Core
//!
//! Core types, errors, and utilities for the Coursekeep API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: The authentication error taxonomy and the HTTP error type
//! - [`password`]: Secure password hashing and verification
//! - [`role`]: The fixed account role enumeration
//!
//! # Example
//!
//! ```ignore
//! use coursekeep_core::{AppError, AuthError, UserRole};
//! use coursekeep_core::password::{hash_password, verify_password};
//!
//! let hash = hash_password("longenough1")?;
//! assert!(verify_password("longenough1", &hash)?);
//!
//! let err: AppError = AuthError::InvalidCredentials.into();
//! ```

pub mod errors;
pub mod password;
pub mod role;

// Re-export commonly used types at crate root
pub use errors::{AppError, AuthError};
pub use password::{hash_password, verify_password};
pub use role::UserRole;
