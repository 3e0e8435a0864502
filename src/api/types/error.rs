//! API error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::sparql::ExecutionError;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    UpstreamError,
    ServerError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::UpstreamError => write!(f, "upstream_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Upstream error text, when the failure came from an upstream service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Leading part of the query that caused a syntax error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    details: None,
                    query: None,
                    code: None,
                },
            },
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.response.error.details = Some(details.into());
        self
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.response.error.query = query;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, ApiErrorType::UpstreamError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }

    /// Relays an upstream error status; anything that is not a 4xx/5xx
    /// becomes 502
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        Self::new(status, ApiErrorType::UpstreamError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<ExecutionError> for ApiError {
    fn from(err: ExecutionError) -> Self {
        let code = err.kind();

        let api_error = match err {
            ExecutionError::InvalidRequest { message } => Self::bad_request(message),
            ExecutionError::UpstreamRejected {
                status,
                message,
                query_excerpt,
            } => Self::upstream(
                status,
                format!("Upstream service responded with status {}", status),
            )
            .with_details(message)
            .with_query(query_excerpt),
            ExecutionError::UpstreamUnreachable { message } => {
                Self::unavailable("Service unavailable: no response from upstream service")
                    .with_details(message)
            }
            ExecutionError::MalformedResponse { message } => {
                Self::bad_gateway("Upstream service returned an invalid response")
                    .with_details(message)
            }
            ExecutionError::LocalSetup { message } => {
                Self::internal("Failed to send request to upstream service").with_details(message)
            }
        };

        api_error.with_code(code)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidId { message } => Self::bad_request(message).with_code("invalid_id"),
            DomainError::Configuration { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_is_400() {
        let err: ApiError = ExecutionError::invalid_request("Query is required").into();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.message, "Query is required");
        assert_eq!(err.response.error.code.as_deref(), Some("invalid_request"));
    }

    #[test]
    fn test_rejection_keeps_upstream_status_and_query() {
        let err: ApiError = ExecutionError::UpstreamRejected {
            status: 400,
            message: "Lexical error".to_string(),
            query_excerpt: Some("SELEC ?x".to_string()),
        }
        .into();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.error_type, ApiErrorType::UpstreamError);
        assert_eq!(err.response.error.details.as_deref(), Some("Lexical error"));
        assert_eq!(err.response.error.query.as_deref(), Some("SELEC ?x"));
    }

    #[test]
    fn test_unusual_upstream_status_becomes_bad_gateway() {
        assert_eq!(ApiError::upstream(302, "moved").status, StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::upstream(999, "odd").status, StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::upstream(504, "timeout").status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_unreachable_is_503() {
        let err: ApiError = ExecutionError::unreachable("operation timed out").into();
        let json = serde_json::to_string(&err.response).unwrap();

        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(json.contains("Service unavailable"));
        assert!(json.contains("service_unavailable_error"));
    }

    #[test]
    fn test_local_setup_is_500() {
        let err: ApiError = ExecutionError::local_setup("builder error").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_malformed_response_is_502() {
        let err: ApiError = ExecutionError::MalformedResponse {
            message: "expected value".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: ApiError = DomainError::invalid_id("bad id").into();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.code.as_deref(), Some("invalid_id"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let err = ApiError::bad_request("Missing parameter");
        let json = serde_json::to_string(&err.response).unwrap();

        assert!(!json.contains("details"));
        assert!(!json.contains("query"));
        assert!(json.contains("invalid_request_error"));
    }
}
