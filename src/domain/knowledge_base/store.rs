//! Vector store trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::document::{DocumentId, Metadata};
use crate::domain::DomainError;

/// Embedding function and dimensionality a collection was populated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub embedding_id: String,
    pub dimensions: usize,
}

impl CollectionInfo {
    pub fn new(name: impl Into<String>, embedding_id: impl Into<String>, dimensions: usize) -> Self {
        Self {
            name: name.into(),
            embedding_id: embedding_id.into(),
            dimensions,
        }
    }

    /// Fail unless the given embedding function matches the recorded one
    pub fn ensure_compatible(&self, embedding_id: &str, dimensions: usize) -> Result<(), DomainError> {
        if self.dimensions != dimensions {
            return Err(DomainError::configuration(format!(
                "Collection '{}' holds {}-dimensional embeddings but the configured embedding function produces {}",
                self.name, self.dimensions, dimensions
            )));
        }

        if self.embedding_id != embedding_id {
            return Err(DomainError::configuration(format!(
                "Collection '{}' was populated with embedding function '{}', not '{}'",
                self.name, self.embedding_id, embedding_id
            )));
        }

        Ok(())
    }

    /// Fail unless a vector has the collection's dimensionality
    pub fn check_vector(&self, vector: &[f32]) -> Result<(), DomainError> {
        if vector.len() != self.dimensions {
            return Err(DomainError::configuration(format!(
                "Collection '{}' expects {}-dimensional vectors, got {}",
                self.name,
                self.dimensions,
                vector.len()
            )));
        }
        Ok(())
    }
}

/// A chunk ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct StoredChunk {
    pub id: String,
    pub document_id: DocumentId,
    pub content: String,
    pub metadata: Metadata,
    pub embedding: Vec<f32>,
}

/// A chunk returned from a nearest-neighbour query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub chunk_id: String,
    pub document_id: DocumentId,
    pub content: String,
    /// Cosine similarity to the query
    pub score: f32,
    pub metadata: Metadata,
}

impl QueryResult {
    /// The `source` metadata entry, if any
    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").map(String::as_str)
    }
}

/// Chunk count per distinct `source` metadata value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub source: String,
    pub chunk_count: usize,
}

/// Persistence for embedded chunks, grouped in named collections.
///
/// Stores reject chunks whose embedding length differs from the collection's
/// recorded dimensionality.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Get the store type name
    fn store_type(&self) -> &'static str;

    /// Recorded info for a collection, `None` if it was never created
    async fn collection_info(&self, collection: &str) -> Result<Option<CollectionInfo>, DomainError>;

    /// Create a collection; creating an existing one with identical info is a no-op
    async fn create_collection(&self, info: CollectionInfo) -> Result<(), DomainError>;

    /// Insert or replace chunks, returning how many were written
    async fn add_chunks(&self, collection: &str, chunks: Vec<StoredChunk>) -> Result<usize, DomainError>;

    /// Swap every stored chunk of `document_id` for `chunks` in one step,
    /// returning how many old chunks were dropped
    async fn replace_document(
        &self,
        collection: &str,
        document_id: &DocumentId,
        chunks: Vec<StoredChunk>,
    ) -> Result<usize, DomainError>;

    /// Nearest chunks by cosine similarity, highest first, at most `top_k`
    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, DomainError>;

    /// Number of chunks in a collection
    async fn chunk_count(&self, collection: &str) -> Result<usize, DomainError>;

    /// Number of distinct documents in a collection
    async fn document_count(&self, collection: &str) -> Result<usize, DomainError>;

    /// Remove every chunk of a document, returning how many were removed
    async fn delete_document(
        &self,
        collection: &str,
        document_id: &DocumentId,
    ) -> Result<usize, DomainError>;

    /// Distinct sources with their chunk counts, sorted by source
    async fn list_sources(&self, collection: &str) -> Result<Vec<SourceInfo>, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_info_compatible() {
        let info = CollectionInfo::new("kb", "hashing-384", 384);
        assert!(info.ensure_compatible("hashing-384", 384).is_ok());
    }

    #[test]
    fn test_collection_info_dimension_mismatch() {
        let info = CollectionInfo::new("kb", "hashing-384", 384);

        let err = info.ensure_compatible("hashing-128", 128).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("384-dimensional"));
    }

    #[test]
    fn test_collection_info_embedding_id_mismatch() {
        let info = CollectionInfo::new("kb", "hashing-768", 768);

        let err = info
            .ensure_compatible("gemini-text-embedding-004", 768)
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_check_vector() {
        let info = CollectionInfo::new("kb", "hashing-3", 3);

        assert!(info.check_vector(&[0.1, 0.2, 0.3]).is_ok());
        assert!(info.check_vector(&[0.1]).unwrap_err().is_configuration());
    }

    #[test]
    fn test_query_result_source() {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), "quick".to_string());

        let result = QueryResult {
            chunk_id: "doc_chunk_0".to_string(),
            document_id: DocumentId::new("doc").unwrap(),
            content: "GDG events are free".to_string(),
            score: 0.5,
            metadata,
        };

        assert_eq!(result.source(), Some("quick"));
    }
}
