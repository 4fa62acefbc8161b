//! Coursekeep Observability
//!
//! Provides:
//! - Tracing subscriber setup (console, optional JSON, optional rolling file)
//! - HTTP request/response logging
//! - Prometheus metrics and auth business counters
//!
//! # Examples
//!
//! ```no_run
//! use coursekeep_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_tracing();
//!     let _handle = init_metrics();
//!     // ... application code ...
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use metrics_exporter_prometheus::PrometheusHandle;

pub use logging::{init_tracing, logging_middleware};
pub use metrics::{
    init_metrics, is_metrics_enabled, metrics_middleware, track_grant_denied, track_login_failure,
    track_login_success, track_logout, track_refresh, track_tokens_issued, track_user_registered,
};
