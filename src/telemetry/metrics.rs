//! Prometheus recorder setup and metric descriptions

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Histogram buckets (seconds) for request latency, with sub-millisecond resolution.
const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)
        .context("invalid histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register HELP/TYPE metadata and seed zero values so every series is
/// visible from the first scrape.
pub fn describe_metrics() {
    describe_counter!(
        "miniature_http_requests_total",
        "Total number of HTTP requests"
    );
    describe_histogram!(
        "miniature_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "miniature_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    describe_counter!(
        "miniature_auth_login_total",
        "Login attempts by result (success/unknown_phone/inactive)"
    );
    describe_counter!(
        "miniature_ownership_checks_total",
        "Shop ownership checks by result (owner/not_owner/error)"
    );

    for result in ["success", "unknown_phone", "inactive"] {
        counter!("miniature_auth_login_total", "result" => result).absolute(0);
    }
    for result in ["owner", "not_owner", "error"] {
        counter!("miniature_ownership_checks_total", "result" => result).absolute(0);
    }
    gauge!("miniature_http_requests_in_flight").set(0.0);
}
