//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Embedding, EmbeddingInput};
use crate::domain::DomainError;

/// Trait for embedding functions (deterministic hashing, Gemini)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate one embedding per input, in input order
    async fn embed(&self, input: EmbeddingInput) -> Result<Vec<Embedding>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Dimensionality of every vector this provider returns
    fn dimensions(&self) -> usize;

    /// Stable identifier recorded with a collection, e.g. `hashing-384`
    fn embedding_id(&self) -> String;

    /// Embed a single text
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.embed(EmbeddingInput::from(text))
            .await?
            .into_iter()
            .next()
            .map(Embedding::into_vector)
            .ok_or_else(|| DomainError::provider(self.provider_name(), "No embedding returned"))
    }
}
