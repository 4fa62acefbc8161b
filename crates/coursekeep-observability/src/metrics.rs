use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if metrics are enabled via METRICS_ENABLED env var (off by default)
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| {
        std::env::var("METRICS_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    })
}

/// Install the Prometheus recorder and its upkeep task.
///
/// Returns `None` when metrics are disabled or the recorder cannot be
/// installed; the server keeps running without a `/metrics` endpoint.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_metrics_enabled() {
        return None;
    }

    let builder = match PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ],
    ) {
        Ok(builder) => builder,
        Err(e) => {
            warn!(error = %e, "Invalid metrics buckets, metrics disabled");
            return None;
        }
    };

    let handle = match builder.install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    info!("Prometheus metrics recorder installed");

    Some(handle)
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let uri_path = req.uri().path().to_owned();

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or(uri_path);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

// Auth business counters. The labels never carry user-supplied values.

pub fn track_user_registered() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_registrations_total").increment(1);
}

pub fn track_login_success(role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_login_success_total", "role" => role.to_string()).increment(1);
}

/// `reason` is one of a fixed set: `invalid_credentials`, `unavailable`, `internal`.
pub fn track_login_failure(reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_login_failure_total", "reason" => reason).increment(1);
}

pub fn track_tokens_issued() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_tokens_issued_total").increment(1);
}

pub fn track_refresh(success: bool) {
    if !is_metrics_enabled() {
        return;
    }
    let status = if success { "success" } else { "failure" };
    counter!("auth_refresh_total", "status" => status).increment(1);
}

pub fn track_logout() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_logout_total").increment(1);
}

pub fn track_grant_denied(role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_grant_denied_total", "role" => role.to_string()).increment(1);
}
