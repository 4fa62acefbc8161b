//! # Coursekeep API
//!
//! Authentication and route authorization for the Coursekeep platform.
//!
//! ## Overview
//!
//! - **Authentication**: short-lived HS256 access tokens plus opaque refresh
//!   tokens kept in the `RefreshToken` cookie
//! - **Single session per user**: the session registry holds one refresh value
//!   per user; a new login or refresh replaces it
//! - **Route authorization**: a role file maps each role to the routes it may
//!   call per HTTP method; anything not listed is denied
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Request gate (AuthUser, require_auth, require_grant)
//! ├── modules/
//! │   ├── auth/        # register, login, refresh-token, logout
//! │   └── users/       # /users/me, guarded by role grants
//! ├── docs.rs          # OpenAPI document
//! ├── router.rs        # Route tree and global layers
//! ├── state.rs         # Shared application state
//! └── validator.rs     # ValidatedJson extractor
//! crates/
//! ├── coursekeep-core/           # AuthError, AppError, UserRole, bcrypt helpers
//! ├── coursekeep-config/         # Environment-driven configuration
//! ├── coursekeep-auth/           # Token codec and bearer parsing
//! ├── coursekeep-cache/          # Session registry (Redis, in-memory)
//! ├── coursekeep-rbac/           # Role manager and grant checks
//! ├── coursekeep-db/             # User store (PostgreSQL, in-memory)
//! ├── coursekeep-models/         # Domain models and DTOs
//! ├── coursekeep-observability/  # Tracing, request logging, metrics
//! └── coursekeep-cli/            # create-admin, check-roles
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Access |
//! |--------|------|--------|
//! | POST | `/api/v1/auth/register` | public |
//! | POST | `/api/v1/auth/login` | public |
//! | POST | `/api/v1/auth/refresh-token` | authenticated |
//! | POST | `/api/v1/auth/logout` | authenticated |
//! | GET | `/api/v1/users/me` | authenticated + granted |
//! | GET | `/health` | public |
//! | GET | `/metrics` | public, when `METRICS_ENABLED=true` |
//!
//! ## Errors
//!
//! All errors are JSON objects of the form `{"error": "<message>"}`.

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;
