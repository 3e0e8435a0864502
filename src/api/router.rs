use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    http::HeaderName,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::domain::DomainError;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

use super::health;
use super::middleware::{
    build_cors_layer, logging_middleware, metrics_middleware, security_headers_middleware,
    MAX_BODY_SIZE, REQUEST_ID_HEADER,
};
use super::properties;
use super::search;
use super::sparql;
use super::state::AppState;
use super::types::ApiError;

/// Routes under `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/search", get(search::search_entities))
        .route("/sparql", post(sparql::run_query))
        .route(
            "/searchProperties/{entity_id}",
            get(properties::search_properties),
        )
}

/// Create the full router with application state.
/// The Prometheus endpoint is mounted only when `metrics` is given.
pub fn create_router(
    state: AppState,
    cors: &CorsConfig,
    metrics: Option<(PrometheusMetrics, &str)>,
) -> Result<Router, DomainError> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .nest("/api", create_api_router())
        .fallback(route_not_found)
        .with_state(state);

    if let Some((metrics, path)) = metrics {
        router = router.merge(create_metrics_router(metrics, path));
    }

    let router = router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(build_cors_layer(cors)?)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        );

    Ok(router)
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
