//! SPARQL proxy endpoint

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::truncate_for_log;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, JsonRejection};
use crate::domain::sparql::QueryText;
use crate::infrastructure::sparql::QueryResult;

pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

#[derive(Debug, Default, Deserialize)]
pub struct SparqlRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// POST /api/sparql
pub async fn run_query(
    State(state): State<AppState>,
    body: Result<Json<SparqlRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = match body {
        Ok(Json(request)) => request,
        // No JSON body, or no string `query` in it
        Err(rejection) if rejection.is_unusable_body() => SparqlRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let query = QueryText::from_optional(request.query)?;

    debug!(query = %truncate_for_log(query.as_str(), 200), "Running SPARQL query");

    let result = state.executor.execute_query(&query).await?;

    Ok(query_response(&result))
}

/// Upstream JSON passed through unchanged, tagged with cache status
pub fn query_response(result: &QueryResult) -> Response {
    let mut response = axum::Json(result.body.as_ref()).into_response();
    let cache_status = if result.is_cached() { "HIT" } else { "MISS" };

    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::domain::sparql::EndpointId;
    use crate::infrastructure::sparql::ResultSource;

    #[test]
    fn test_request_without_query_deserializes() {
        let request: SparqlRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_none());
    }

    #[test]
    fn test_query_response_headers() {
        let body = Arc::new(json!({ "results": { "bindings": [] } }));

        let miss = query_response(&QueryResult {
            body: body.clone(),
            source: ResultSource::Upstream(EndpointId::Wikibase),
        });
        let hit = query_response(&QueryResult {
            body,
            source: ResultSource::Cache,
        });

        assert_eq!(miss.status(), StatusCode::OK);
        assert_eq!(miss.headers()[&CACHE_STATUS_HEADER], "MISS");
        assert_eq!(hit.headers()[&CACHE_STATUS_HEADER], "HIT");
    }
}
