//! Ping and health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

/// `GET /api/ping` response
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
    pub time: String,
}

pub const HEALTHY: &str = "healthy";

/// Health response with component details
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// GET /api/ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// GET /health
///
/// Reports the result cache size. Upstream endpoints are not contacted here;
/// their availability shows up per request as 503s.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let start = Instant::now();
    let cache_check = check_result_cache(&state).await;

    Json(HealthResponse {
        status: HEALTHY,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![cache_check]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    })
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_result_cache(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let entries = state.executor.cache().len().await;

    HealthCheck {
        name: "result_cache".to_string(),
        status: HEALTHY,
        message: Some(format!("{} entries", entries)),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    }
}
