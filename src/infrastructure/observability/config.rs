//! Tracing export and Prometheus settings (`[observability]`)

use opentelemetry_sdk::trace::Sampler;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: TracingConfig,
    pub metrics: MetricsConfig,
}

/// OpenTelemetry span export; off unless an OTLP collector is configured
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// gRPC collector address, e.g. `http://localhost:4317`
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
    /// Share of traces kept, clamped to `0.0..=1.0`
    pub sampling_ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            service_name: env!("CARGO_PKG_NAME").to_string(),
            sampling_ratio: 1.0,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl TracingConfig {
    /// Collector to export to; a blank endpoint counts as unset
    pub fn export_endpoint(&self) -> Option<&str> {
        self.otlp_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }

    pub fn sampler(&self) -> Sampler {
        match self.sampling_ratio {
            ratio if ratio >= 1.0 => Sampler::AlwaysOn,
            ratio if ratio > 0.0 => Sampler::TraceIdRatioBased(ratio),
            _ => Sampler::AlwaysOff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_off_by_default() {
        let config = ObservabilityConfig::default();

        assert!(config.tracing.export_endpoint().is_none());
        assert_eq!(config.tracing.service_name, "charters-gateway");
        assert_eq!(config.metrics.path, "/metrics");
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_blank_endpoint_is_unset() {
        let config: TracingConfig =
            serde_json::from_str(r#"{"otlp_endpoint": "  "}"#).unwrap();
        assert!(config.export_endpoint().is_none());

        let config: TracingConfig =
            serde_json::from_str(r#"{"otlp_endpoint": "http://collector:4317"}"#).unwrap();
        assert_eq!(config.export_endpoint(), Some("http://collector:4317"));
    }

    #[test]
    fn test_sampler_clamps_ratio() {
        let mut config = TracingConfig::default();
        assert!(matches!(config.sampler(), Sampler::AlwaysOn));

        config.sampling_ratio = 0.25;
        assert!(matches!(config.sampler(), Sampler::TraceIdRatioBased(r) if r == 0.25));

        config.sampling_ratio = -1.0;
        assert!(matches!(config.sampler(), Sampler::AlwaysOff));
    }

    #[test]
    fn test_metrics_section_alone() {
        let config: ObservabilityConfig =
            serde_json::from_str(r#"{"metrics": {"enabled": false}}"#).unwrap();

        assert!(!config.metrics.enabled);
        assert_eq!(config.metrics.path, "/metrics");
        assert!(config.tracing.export_endpoint().is_none());
    }
}
