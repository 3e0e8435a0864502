//! reqwest-backed upstream client for SPARQL and Wikibase API calls

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::domain::sparql::{UpstreamClient, UpstreamError, UpstreamRequest};
use crate::domain::DomainError;

/// Default timeout for every upstream call
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

/// Upstream client using reqwest
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    /// Builds a client with a fixed per-request timeout and an identifying
    /// `User-Agent`
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn get_json(&self, request: UpstreamRequest) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.params)
            .header(ACCEPT, request.accept)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(body_read_error)?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| UpstreamError::MalformedBody {
            message: e.to_string(),
        })
    }
}

// The status line arrived but the body did not
fn body_read_error(error: reqwest::Error) -> UpstreamError {
    UpstreamError::Unreachable {
        message: format!("Failed to read response body: {}", error),
    }
}

/// Splits send failures into "never left the process" and "no response"
fn classify_send_error(error: reqwest::Error) -> UpstreamError {
    if error.is_builder() {
        return UpstreamError::Setup {
            message: error.to_string(),
        };
    }

    if error.is_timeout() {
        return UpstreamError::Unreachable {
            message: format!("Request timed out: {}", error),
        };
    }

    if error.is_connect() || error.is_request() || error.is_body() {
        return UpstreamError::Unreachable {
            message: error.to_string(),
        };
    }

    UpstreamError::Setup {
        message: error.to_string(),
    }
}
