//! Keyword search against the Wikibase action API

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::search::SearchParams;
use crate::domain::sparql::{ExecutionError, UpstreamClient, UpstreamRequest};
use crate::infrastructure::observability::record_upstream_request;

/// Forwards keyword searches to `wbsearchentities`. Results are not cached.
pub struct WikibaseSearchService {
    client: Arc<dyn UpstreamClient>,
    api_url: String,
}

impl std::fmt::Debug for WikibaseSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikibaseSearchService")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl WikibaseSearchService {
    pub fn new(client: Arc<dyn UpstreamClient>, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    fn build_request(&self, params: &SearchParams) -> UpstreamRequest {
        let request = UpstreamRequest::get(&self.api_url)
            .with_param("action", "wbsearchentities")
            .with_param("search", params.query())
            .with_param("language", params.language())
            .with_param("uselang", params.language())
            .with_param("type", params.entity_type())
            .with_param("format", "json");

        match params.limit() {
            Some(limit) => request.with_param("limit", limit.to_string()),
            None => request,
        }
    }

    /// Returns the raw `wbsearchentities` response
    pub async fn search(&self, params: &SearchParams) -> Result<Value, ExecutionError> {
        let start = Instant::now();
        let outcome = self.client.get_json(self.build_request(params)).await;
        let duration = start.elapsed();

        match outcome {
            Ok(body) => {
                record_upstream_request("wikibase_api", "success", duration);
                debug!(duration_ms = duration.as_millis() as u64, "Search completed");
                Ok(body)
            }
            Err(upstream_error) => {
                let error = ExecutionError::from(upstream_error);
                record_upstream_request("wikibase_api", error.kind(), duration);
                warn!(kind = error.kind(), error = %error, "Search failed");
                Err(error)
            }
        }
    }
}
