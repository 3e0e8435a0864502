//! Request/response logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs every request and its outcome.
/// `TraceLayer` owns the request span, so no span is opened here.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);
    let headers_log = loggable_headers(&request);

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        headers = %headers_log,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request completed"
        );
    }

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn loggable_headers(request: &Request<Body>) -> String {
    request
        .headers()
        .iter()
        .filter(|(name, _)| should_log_header(name.as_str()))
        .map(|(name, value)| {
            let value = if is_sensitive_header(name.as_str()) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[invalid]")
            };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "cookie" | "proxy-authorization" | "x-api-key"
    )
}

fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "accept"
            | "origin"
            | "user-agent"
            | "x-forwarded-for"
            | "authorization"
            | "cookie"
    )
}

/// Shortens long values (query text, upstream bodies) for log fields
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_index, _)) => format!(
            "{}...[truncated {} chars]",
            &s[..byte_index],
            s.chars().count() - max_chars
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sensitive_header() {
        assert!(is_sensitive_header("authorization"));
        assert!(is_sensitive_header("cookie"));
        assert!(!is_sensitive_header("origin"));
    }

    #[test]
    fn test_loggable_headers_redacts() {
        let request = Request::builder()
            .header("authorization", "Bearer abc")
            .header("origin", "https://charters.example.org")
            .header("etag", "x")
            .body(Body::empty())
            .unwrap();

        let logged = loggable_headers(&request);

        assert!(logged.contains("authorization=[REDACTED]"));
        assert!(logged.contains("origin=https://charters.example.org"));
        assert!(!logged.contains("etag"));
        assert!(!logged.contains("abc"));
    }

    #[test]
    fn test_request_id_from_header() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract_request_id(&request), "req-42");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("hello", 10), "hello");
        assert_eq!(truncate_for_log("exactly10!", 10), "exactly10!");

        let truncated = truncate_for_log("SELECT ?item WHERE { ?item ?p ?o }", 6);
        assert!(truncated.starts_with("SELECT..."));
        assert!(truncated.contains("[truncated"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let truncated = truncate_for_log("Łódź Kraków", 4);
        assert!(truncated.starts_with("Łódź..."));
    }
}
