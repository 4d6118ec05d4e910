//! Application metrics
//!
//! Prometheus recorder and the counters recorded while counting tokens.
//! Until [`init_metrics`] runs, recording is a no-op.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "tokentally_requests_total",
        "Total number of counting requests processed"
    );
    metrics::describe_counter!(
        "tokentally_tokens_counted_total",
        "Total tokens counted, by provider"
    );
    metrics::describe_counter!(
        "tokentally_count_failures_total",
        "Counting calls that failed and reported 0"
    );
    metrics::describe_histogram!(
        "tokentally_count_duration_seconds",
        "Time spent in a single counting call"
    );
}

/// Render all metrics in Prometheus text format
pub fn render() -> String {
    PROMETHEUS_HANDLE.render()
}

/// Record a request
pub fn record_request(route: &str) {
    metrics::counter!("tokentally_requests_total", "route" => route.to_string()).increment(1);
}

/// Record tokens counted
pub fn record_tokens(provider: &str, count: u64) {
    metrics::counter!(
        "tokentally_tokens_counted_total",
        "provider" => provider.to_string()
    )
    .increment(count);
}

/// Record a counting call that collapsed to 0
pub fn record_count_failure(strategy: &str) {
    metrics::counter!(
        "tokentally_count_failures_total",
        "strategy" => strategy.to_string()
    )
    .increment(1);
}

/// Record how long a counting call took
pub fn record_count_duration(strategy: &str, duration_secs: f64) {
    metrics::histogram!(
        "tokentally_count_duration_seconds",
        "strategy" => strategy.to_string()
    )
    .record(duration_secs);
}
