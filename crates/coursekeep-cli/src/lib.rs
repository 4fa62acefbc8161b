//! # Coursekeep CLI
//!
//! Administrative helpers used by the `coursekeep-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use coursekeep_cli::{admin::{create_admin, AdminInput}, roles::describe_roles};
//!
//! let id = create_admin(&repo, input).await?;
//! print!("{}", describe_roles(&manager));
//! ```

pub mod admin;
pub mod roles;
