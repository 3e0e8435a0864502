//! Cache key derivation for query results

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Key under which a query result is cached.
///
/// The key is the standard base64 encoding of the query's UTF-8 bytes, so it
/// is injective: two queries share a key only if they are byte-identical.
/// No whitespace or case normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryCacheKey(String);

impl QueryCacheKey {
    /// Derives the key for a query text
    pub fn from_query(query: &str) -> Self {
        Self(STANDARD.encode(query.as_bytes()))
    }

    /// Returns the string representation of the key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
