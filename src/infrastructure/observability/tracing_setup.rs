//! Tracing subscriber setup with optional OpenTelemetry export

use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{RandomIdGenerator, TracerProvider},
    Resource,
};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use super::config::TracingConfig;
use crate::config::{LogFormat, LoggingConfig};

/// Initialize the global subscriber for the server
pub fn init_tracing(logging_config: &LoggingConfig, tracing_config: &TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging_config.level));

    let json_layer = matches!(logging_config.format, LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });

    let pretty_layer = matches!(logging_config.format, LogFormat::Pretty).then(|| {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
    });

    let (provider, otel_error) = match tracing_config.export_endpoint() {
        Some(endpoint) => match init_otel_tracing(tracing_config, endpoint) {
            Ok(provider) => (Some(provider), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };

    let telemetry_layer = provider.as_ref().map(|provider| {
        opentelemetry::global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer(tracing_config.service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(telemetry_layer)
        .init();

    match (provider, otel_error) {
        (Some(_), _) => tracing::info!(
            "Tracing initialized with OpenTelemetry export to {}",
            tracing_config.export_endpoint().unwrap_or_default()
        ),
        (None, Some(e)) => tracing::warn!(
            "Failed to initialize OpenTelemetry: {}. Tracing disabled.",
            e
        ),
        (None, None) => tracing::info!(
            level = %logging_config.level,
            "Tracing initialized (OpenTelemetry disabled)"
        ),
    }
}

fn init_otel_tracing(
    config: &TracingConfig,
    endpoint: &str,
) -> Result<TracerProvider, opentelemetry::trace::TraceError> {
    let resource = Resource::new(vec![KeyValue::new(
        "service.name",
        config.service_name.clone(),
    )]);

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = TracerProvider::builder()
        .with_sampler(config.sampler())
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter, runtime::Tokio)
        .build();

    Ok(provider)
}

/// Shutdown tracing and flush pending spans
pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
    tracing::info!("Tracing shutdown complete");
}
