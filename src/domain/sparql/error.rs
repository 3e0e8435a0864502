//! Query execution failures

use thiserror::Error;

use super::query::{excerpt, QUERY_EXCERPT_CHARS};
use super::upstream::UpstreamError;

/// Upstream error body fragments that identify a query syntax problem
const SYNTAX_ERROR_MARKERS: [&str; 4] = [
    "MalformedQueryException",
    "Lexical error",
    "Parse error",
    "Encountered \"",
];

/// Longest upstream error body echoed back to callers
const MAX_UPSTREAM_MESSAGE_CHARS: usize = 2000;

/// Why a query or search could not be answered
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    /// A required parameter is absent or empty
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The upstream answered with a non-2xx status
    #[error("Upstream responded with status {status}: {message}")]
    UpstreamRejected {
        status: u16,
        message: String,
        /// Leading part of the offending query, for syntax-class failures
        query_excerpt: Option<String>,
    },

    /// The request was sent but nothing came back
    #[error("Service unavailable: {message}")]
    UpstreamUnreachable { message: String },

    /// The upstream answered 2xx with a body that is not JSON
    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    /// The outbound request could not be constructed or sent
    #[error("Request setup failed: {message}")]
    LocalSetup { message: String },
}

impl ExecutionError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::UpstreamUnreachable {
            message: message.into(),
        }
    }

    pub fn local_setup(message: impl Into<String>) -> Self {
        Self::LocalSetup {
            message: message.into(),
        }
    }

    /// Classifies an upstream failure for the query that caused it.
    ///
    /// Syntax-class rejections carry the first characters of `query`.
    pub fn from_upstream(error: UpstreamError, query: &str) -> Self {
        match error {
            UpstreamError::Status { status, body } => {
                let query_excerpt = is_syntax_error(status, &body)
                    .then(|| excerpt(query, QUERY_EXCERPT_CHARS));

                Self::UpstreamRejected {
                    status,
                    message: excerpt(&body, MAX_UPSTREAM_MESSAGE_CHARS),
                    query_excerpt,
                }
            }
            other => Self::from(other),
        }
    }

    /// Short machine-readable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::UpstreamRejected { .. } => "upstream_rejected",
            Self::UpstreamUnreachable { .. } => "upstream_unreachable",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::LocalSetup { .. } => "local_setup",
        }
    }
}

/// Classification without a query to excerpt (e.g. keyword search)
impl From<UpstreamError> for ExecutionError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::Status { status, body } => Self::UpstreamRejected {
                status,
                message: excerpt(&body, MAX_UPSTREAM_MESSAGE_CHARS),
                query_excerpt: None,
            },
            UpstreamError::Unreachable { message } => Self::UpstreamUnreachable { message },
            UpstreamError::Setup { message } => Self::LocalSetup { message },
            UpstreamError::MalformedBody { message } => Self::MalformedResponse { message },
        }
    }
}

fn is_syntax_error(status: u16, body: &str) -> bool {
    status == 400 || SYNTAX_ERROR_MARKERS.iter().any(|marker| body.contains(marker))
}
