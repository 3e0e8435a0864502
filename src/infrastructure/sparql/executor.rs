//! Query executor - cache lookup, endpoint routing, and failure classification

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::cache::{QueryCacheKey, ResultCache};
use crate::domain::sparql::{
    select_endpoint, EndpointId, ExecutionError, QueryText, SparqlEndpoints, UpstreamClient,
    UpstreamRequest,
};
use crate::infrastructure::observability::{record_cache_lookup, record_upstream_request};

/// Where a query result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Cache,
    Upstream(EndpointId),
}

/// Successful query execution
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub body: Arc<Value>,
    pub source: ResultSource,
}

impl QueryResult {
    pub fn is_cached(&self) -> bool {
        self.source == ResultSource::Cache
    }
}

/// Runs SPARQL queries against the upstream endpoints through the result
/// cache.
///
/// Each call makes at most one upstream attempt. Concurrent misses for the
/// same query are not coalesced; each issues its own upstream call and the
/// last successful one wins the cache slot.
pub struct QueryExecutor {
    client: Arc<dyn UpstreamClient>,
    cache: Arc<dyn ResultCache>,
    endpoints: SparqlEndpoints,
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("endpoints", &self.endpoints)
            .field("cache", &self.cache)
            .finish()
    }
}

impl QueryExecutor {
    pub fn new(
        client: Arc<dyn UpstreamClient>,
        cache: Arc<dyn ResultCache>,
        endpoints: SparqlEndpoints,
    ) -> Self {
        Self {
            client,
            cache,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &SparqlEndpoints {
        &self.endpoints
    }

    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    /// Validates and executes raw query text
    pub async fn execute(&self, query: &str) -> Result<QueryResult, ExecutionError> {
        let query = QueryText::new(query)?;
        self.execute_query(&query).await
    }

    /// Executes a validated query
    pub async fn execute_query(&self, query: &QueryText) -> Result<QueryResult, ExecutionError> {
        let key = QueryCacheKey::from_query(query.as_str());

        if let Some(body) = self.cache.get(&key).await {
            record_cache_lookup(true);
            debug!(query_len = query.as_str().len(), "Query served from cache");

            return Ok(QueryResult {
                body,
                source: ResultSource::Cache,
            });
        }

        record_cache_lookup(false);

        let endpoint = select_endpoint(query.as_str());
        let request = UpstreamRequest::sparql(self.endpoints.url_for(endpoint), query.as_str());
        let start = Instant::now();
        let outcome = self.client.get_json(request).await;
        let duration = start.elapsed();

        match outcome {
            Ok(body) => {
                record_upstream_request(endpoint.as_str(), "success", duration);
                info!(
                    endpoint = %endpoint,
                    duration_ms = duration.as_millis() as u64,
                    "Query executed"
                );

                let body = Arc::new(body);
                self.cache.set(key, Arc::clone(&body)).await;

                Ok(QueryResult {
                    body,
                    source: ResultSource::Upstream(endpoint),
                })
            }
            Err(upstream_error) => {
                let error = ExecutionError::from_upstream(upstream_error, query.as_str());
                record_upstream_request(endpoint.as_str(), error.kind(), duration);
                log_failure(endpoint, &error);

                Err(error)
            }
        }
    }
}

fn log_failure(endpoint: EndpointId, error: &ExecutionError) {
    match error {
        ExecutionError::InvalidRequest { .. } => {
            debug!(endpoint = %endpoint, error = %error, "Query rejected")
        }
        ExecutionError::LocalSetup { .. } => {
            error!(endpoint = %endpoint, error = %error, "Failed to send query")
        }
        _ => warn!(endpoint = %endpoint, kind = error.kind(), error = %error, "Query failed"),
    }
}
