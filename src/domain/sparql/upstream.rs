//! Outbound call abstraction for upstream services

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Media type requested from SPARQL endpoints
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Media type requested from the Wikibase action API
pub const APPLICATION_JSON: &str = "application/json";

/// A single GET request to an upstream service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub accept: &'static str,
}

impl UpstreamRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
            accept: APPLICATION_JSON,
        }
    }

    /// GET request against a SPARQL endpoint with the standard parameters
    pub fn sparql(url: impl Into<String>, query: &str) -> Self {
        Self::get(url)
            .with_param("query", query)
            .with_param("format", "json")
            .with_accept(SPARQL_RESULTS_JSON)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Outcome of an outbound call that did not yield a JSON body
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The upstream answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request went out but no response came back (timeout, DNS,
    /// refused or reset connection)
    #[error("No response from upstream: {message}")]
    Unreachable { message: String },

    /// The request could not be built or sent
    #[error("Failed to build upstream request: {message}")]
    Setup { message: String },

    /// A 2xx response whose body is not valid JSON
    #[error("Upstream returned invalid JSON: {message}")]
    MalformedBody { message: String },
}

/// Client for the upstream SPARQL and Wikibase APIs.
///
/// Implementations make exactly one attempt per call; there are no retries.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issues the request and returns the parsed JSON body of a 2xx response
    async fn get_json(&self, request: UpstreamRequest) -> Result<Value, UpstreamError>;
}
