use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Retrieval error: {message}")]
    Retrieval { message: String },

    #[error("Generation unavailable: {message}")]
    GenerationUnavailable { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval {
            message: message.into(),
        }
    }

    pub fn generation_unavailable(message: impl Into<String>) -> Self {
        Self::GenerationUnavailable {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is a configuration problem
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Whether the error is a retrieval failure
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Self::Retrieval { .. })
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("chunk_overlap must be less than chunk_size");
        assert_eq!(
            error.to_string(),
            "Configuration error: chunk_overlap must be less than chunk_size"
        );
        assert!(error.is_configuration());
    }

    #[test]
    fn test_retrieval_error() {
        let error = DomainError::retrieval("collection 'kb' is empty");
        assert_eq!(error.to_string(), "Retrieval error: collection 'kb' is empty");
        assert!(error.is_retrieval());
        assert!(!error.is_configuration());
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("gemini", "HTTP 500");
        assert_eq!(error.to_string(), "Provider error: gemini - HTTP 500");
    }
}
