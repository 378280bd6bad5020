//! Deterministic feature-hashing embedding

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::embedding::{Embedding, EmbeddingInput, EmbeddingProvider};
use crate::domain::{DomainError, TextCleaner};

/// Default vector size of the hashing embedding
pub const DEFAULT_HASHING_DIMENSIONS: usize = 384;

/// Offline embedding: every cleaned token is hashed into a signed bucket,
/// then the vector is L2-normalized. Identical input gives bit-identical
/// output across runs and machines.
#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
    cleaner: TextCleaner,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "Hashing embedding dimensions must be greater than 0",
            ));
        }

        Ok(Self {
            dimensions,
            cleaner: TextCleaner::new(),
        })
    }

    /// Embed one text synchronously
    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in self.cleaner.tokenize(text) {
            let digest = Sha256::digest(token.as_bytes());

            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };

            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }

        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, input: EmbeddingInput) -> Result<Vec<Embedding>, DomainError> {
        Ok(input
            .as_vec()
            .iter()
            .enumerate()
            .map(|(idx, text)| Embedding::new(idx, self.embed_sync(text)))
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embedding_id(&self) -> String {
        format!("hashing-{}", self.dimensions)
    }
}
