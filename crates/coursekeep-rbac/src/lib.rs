//! # Coursekeep RBAC
//!
//! Static role -> permission -> route authorization.
//!
//! The role table is read once at startup from a JSON definition file and is
//! immutable afterwards, so it can be shared behind an `Arc` and read from any
//! number of requests without locking.
//!
//! - [`route`]: Route key normalization
//! - [`permission`]: A method plus the set of routes it opens
//! - [`role`]: A named, ordered list of permissions
//! - [`manager`]: [`RoleManager`], the grant decision table and file loader
//!
//! # Role File Format
//!
//! ```json
//! {
//!   "roles": [
//!     {
//!       "name": "guest",
//!       "permissions": [
//!         { "method": "POST", "routes": ["/auth/logout/", "/auth/refresh-token/"] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use coursekeep_rbac::RoleManager;
//!
//! let roles = RoleManager::from_file("roles.json")?;
//! let granted = roles.grant("guest", "post", " /auth/logout/ ")?;
//! ```

pub mod manager;
pub mod permission;
pub mod role;
pub mod route;

pub use manager::RoleManager;
pub use permission::Permission;
pub use role::Role;
pub use route::normalize_route;
