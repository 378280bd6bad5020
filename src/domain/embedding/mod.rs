//! Embedding provider domain models and traits

mod provider;
mod request;
mod response;
mod similarity;

pub use provider::EmbeddingProvider;
pub use request::EmbeddingInput;
pub use response::Embedding;
pub use similarity::{
    cosine_similarity, interpret_similarity, rank_by_similarity, RankedMatch, SimilarityLevel,
};

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
