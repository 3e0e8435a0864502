//! Keyword search parameters for the Wikibase `wbsearchentities` action

use super::sparql::ExecutionError;

pub const DEFAULT_SEARCH_LANGUAGE: &str = "en";
pub const DEFAULT_ENTITY_TYPE: &str = "item";
pub const MAX_SEARCH_LIMIT: u32 = 50;

const ENTITY_TYPES: [&str; 2] = ["item", "property"];

/// Validated keyword search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    query: String,
    language: String,
    entity_type: String,
    limit: Option<u32>,
}

impl SearchParams {
    /// Creates search parameters; the search text is forwarded verbatim
    pub fn new(query: Option<String>) -> Result<Self, ExecutionError> {
        let query = query
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ExecutionError::invalid_request("Query parameter is required"))?;

        Ok(Self {
            query,
            language: DEFAULT_SEARCH_LANGUAGE.to_string(),
            entity_type: DEFAULT_ENTITY_TYPE.to_string(),
            limit: None,
        })
    }

    pub fn with_language(mut self, language: Option<String>) -> Result<Self, ExecutionError> {
        if let Some(language) = language {
            let valid = !language.is_empty()
                && language.len() <= 16
                && language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

            if !valid {
                return Err(ExecutionError::invalid_request(format!(
                    "Invalid language code '{}'",
                    language
                )));
            }

            self.language = language;
        }

        Ok(self)
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Result<Self, ExecutionError> {
        if let Some(limit) = limit {
            if limit == 0 || limit > MAX_SEARCH_LIMIT {
                return Err(ExecutionError::invalid_request(format!(
                    "limit must be between 1 and {}",
                    MAX_SEARCH_LIMIT
                )));
            }

            self.limit = Some(limit);
        }

        Ok(self)
    }

    pub fn with_entity_type(mut self, entity_type: Option<String>) -> Result<Self, ExecutionError> {
        if let Some(entity_type) = entity_type {
            if !ENTITY_TYPES.contains(&entity_type.as_str()) {
                return Err(ExecutionError::invalid_request(format!(
                    "type must be one of: {}",
                    ENTITY_TYPES.join(", ")
                )));
            }

            self.entity_type = entity_type;
        }

        Ok(self)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_rejected() {
        assert!(matches!(
            SearchParams::new(None),
            Err(ExecutionError::InvalidRequest { .. })
        ));
        assert!(matches!(
            SearchParams::new(Some(String::new())),
            Err(ExecutionError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_whitespace_query_forwarded() {
        let params = SearchParams::new(Some(" ".to_string())).unwrap();
        assert_eq!(params.query(), " ");
    }

    #[test]
    fn test_defaults() {
        let params = SearchParams::new(Some("Canterbury".to_string())).unwrap();

        assert_eq!(params.query(), "Canterbury");
        assert_eq!(params.language(), "en");
        assert_eq!(params.entity_type(), "item");
        assert_eq!(params.limit(), None);
    }

    #[test]
    fn test_overrides() {
        let params = SearchParams::new(Some("Wilhelm".to_string()))
            .and_then(|p| p.with_language(Some("de".to_string())))
            .and_then(|p| p.with_limit(Some(20)))
            .and_then(|p| p.with_entity_type(Some("property".to_string())))
            .unwrap();

        assert_eq!(params.language(), "de");
        assert_eq!(params.limit(), Some(20));
        assert_eq!(params.entity_type(), "property");
    }

    #[test]
    fn test_limit_bounds() {
        let params = SearchParams::new(Some("x".to_string())).unwrap();

        assert!(params.clone().with_limit(Some(0)).is_err());
        assert!(params.clone().with_limit(Some(51)).is_err());
        assert!(params.with_limit(Some(50)).is_ok());
    }

    #[test]
    fn test_invalid_language_and_type() {
        let params = SearchParams::new(Some("x".to_string())).unwrap();

        assert!(params.clone().with_language(Some("en&action=edit".to_string())).is_err());
        assert!(params.with_entity_type(Some("lexeme".to_string())).is_err());
    }
}
