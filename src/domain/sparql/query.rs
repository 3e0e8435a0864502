//! Query text accepted from callers

use std::fmt;

use super::error::ExecutionError;

/// Number of characters of a query echoed back in syntax error responses
pub const QUERY_EXCERPT_CHARS: usize = 500;

/// Opaque, non-empty SPARQL query text.
///
/// The content is never parsed; only the empty string is rejected.
/// Whitespace-only text is forwarded and left for the endpoint to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText(String);

impl QueryText {
    pub fn new(text: impl Into<String>) -> Result<Self, ExecutionError> {
        let text = text.into();

        if text.is_empty() {
            return Err(ExecutionError::invalid_request("Query is required"));
        }

        Ok(Self(text))
    }

    /// Builds a query text from an optional request field
    pub fn from_optional(text: Option<String>) -> Result<Self, ExecutionError> {
        match text {
            Some(text) => Self::new(text),
            None => Err(ExecutionError::invalid_request("Query is required")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters of the query, used to point at syntax errors
    pub fn excerpt(&self) -> String {
        excerpt(&self.0, QUERY_EXCERPT_CHARS)
    }
}

impl fmt::Display for QueryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First `max_chars` characters of `text`, never splitting a character
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}
