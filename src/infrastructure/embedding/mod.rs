//! Embedding provider implementations

mod factory;
mod gemini;
mod hashing;

pub use factory::EmbeddingProviderFactory;
pub use gemini::{GeminiEmbeddingProvider, DEFAULT_GEMINI_EMBEDDING_MODEL, MAX_EMBEDDING_BATCH};
pub use hashing::{HashingEmbeddingProvider, DEFAULT_HASHING_DIMENSIONS};

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};
