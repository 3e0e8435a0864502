use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_error() {
        let error = DomainError::invalid_id("'X1' is not an entity ID");
        assert_eq!(error.to_string(), "Invalid ID format: 'X1' is not an entity ID");
    }

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("upstream.wikibase_api_url is not set");
        assert_eq!(
            error.to_string(),
            "Configuration error: upstream.wikibase_api_url is not set"
        );
    }
}
