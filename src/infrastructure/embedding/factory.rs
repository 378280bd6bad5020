use std::sync::Arc;
use std::time::Duration;

use super::gemini::GeminiEmbeddingProvider;
use super::hashing::HashingEmbeddingProvider;
use crate::config::{EmbeddingSettings, EmbeddingStrategy, GenerationSettings, GEMINI_API_KEY_VAR};
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::llm::{HttpClient, DEFAULT_GEMINI_BASE_URL};

/// Factory for creating the configured embedding function
#[derive(Debug)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Build the embedding function named by `embedding.strategy`.
    ///
    /// The Gemini strategy shares the API key, base URL and timeout of the
    /// generation settings; it is never substituted by hashing when the key
    /// is missing.
    pub fn create(
        embedding: &EmbeddingSettings,
        generation: &GenerationSettings,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        match embedding.strategy {
            EmbeddingStrategy::Hashing => Self::create_hashing(embedding.dimensions),
            EmbeddingStrategy::Gemini => {
                let api_key = generation.api_key().ok_or_else(|| {
                    DomainError::configuration(format!(
                        "Gemini embeddings require {}",
                        GEMINI_API_KEY_VAR
                    ))
                })?;

                let client =
                    HttpClient::with_timeout(Duration::from_secs(generation.timeout_secs))?;
                let base_url = generation
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_GEMINI_BASE_URL);

                let provider = GeminiEmbeddingProvider::with_base_url(
                    client,
                    api_key,
                    &embedding.model,
                    base_url,
                )?;
                Ok(Arc::new(provider))
            }
        }
    }

    /// Create the offline hashing embedding directly
    pub fn create_hashing(dimensions: usize) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        Ok(Arc::new(HashingEmbeddingProvider::new(dimensions)?))
    }
}
