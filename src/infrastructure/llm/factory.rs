use std::sync::Arc;
use std::time::Duration;

use super::gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL};
use super::http_client::HttpClient;
use crate::config::{GenerationSettings, GEMINI_API_KEY_VAR};
use crate::domain::{DomainError, LlmProvider};

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the Gemini provider described by the generation settings.
    ///
    /// A missing API key yields `GenerationUnavailable` so callers can degrade.
    pub fn create(settings: &GenerationSettings) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = settings.api_key().ok_or_else(|| {
            DomainError::generation_unavailable(format!("{} is not set", GEMINI_API_KEY_VAR))
        })?;

        let client = HttpClient::with_timeout(Duration::from_secs(settings.timeout_secs))?;
        let base_url = settings
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE_URL);

        Ok(Arc::new(GeminiProvider::with_base_url(
            client, api_key, base_url,
        )))
    }

    /// Gemini provider with default settings apart from the key
    pub fn create_gemini(api_key: impl Into<String>) -> Result<Arc<dyn LlmProvider>, DomainError> {
        Self::create(&GenerationSettings {
            api_key: Some(api_key.into()),
            ..GenerationSettings::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_unavailable() {
        let settings = GenerationSettings::default();

        let err = LlmProviderFactory::create(&settings).unwrap_err();
        assert!(matches!(err, DomainError::GenerationUnavailable { .. }));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_create_with_api_key() {
        let settings = GenerationSettings {
            api_key: Some("test-key".to_string()),
            base_url: Some("http://localhost:9999/".to_string()),
            ..GenerationSettings::default()
        };

        let provider = LlmProviderFactory::create(&settings).unwrap();
        assert_eq!(provider.provider_name(), "gemini");
    }

    #[test]
    fn test_create_gemini_directly() {
        let provider = LlmProviderFactory::create_gemini("key").unwrap();
        assert_eq!(provider.provider_name(), "gemini");

        let err = LlmProviderFactory::create_gemini("  ").unwrap_err();
        assert!(matches!(err, DomainError::GenerationUnavailable { .. }));
    }

    #[test]
    fn test_default_timeout_is_applied() {
        assert_eq!(GenerationSettings::default().timeout_secs, 60);
        assert!(HttpClient::with_timeout(Duration::from_secs(60)).is_ok());
    }
}
