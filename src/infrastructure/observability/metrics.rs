//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use super::config::MetricsConfig;

static ENTITY_ID_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/[QP]\d+(/|$)").unwrap());

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("charters_gateway_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record a result cache lookup
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("sparql_cache_lookups_total", "result" => result).increment(1);
}

/// Record one outbound call to an upstream service
pub fn record_upstream_request(target: &'static str, outcome: &'static str, duration: Duration) {
    let labels = [("target", target), ("outcome", outcome)];

    counter!("upstream_requests_total", &labels).increment(1);
    histogram!("upstream_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Collapse entity IDs in paths so label cardinality stays bounded
fn sanitize_path(path: &str) -> String {
    let path = ENTITY_ID_SEGMENT.replace_all(path, "/{id}$1");

    if path.len() > 50 {
        path[..50].to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_entity_id() {
        assert_eq!(
            sanitize_path("/api/searchProperties/Q4211"),
            "/api/searchProperties/{id}"
        );
    }

    #[test]
    fn test_sanitize_path_no_id() {
        assert_eq!(sanitize_path("/api/sparql"), "/api/sparql");
        assert_eq!(sanitize_path("/api/Query"), "/api/Query");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert!(sanitize_path(path).len() <= 50);
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_cache_lookup(true);
        record_cache_lookup(false);
        record_upstream_request("wikibase", "success", Duration::from_millis(12));
        record_http_request("GET", "/api/ping", 200, Duration::from_millis(1));
    }
}
