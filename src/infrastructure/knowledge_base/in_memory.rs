//! In-memory vector store for tests and throwaway sessions

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::scoring::{missing_collection, source_of, top_k_by_score};
use crate::domain::knowledge_base::{
    CollectionInfo, DocumentId, QueryResult, SourceInfo, StoredChunk, VectorStore,
};
use crate::domain::{cosine_similarity, DomainError};

/// Vector store keeping every collection in process memory.
///
/// Queries are brute-force cosine similarity over all chunks.
#[derive(Debug, Default, Clone)]
pub struct InMemoryVectorStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

#[derive(Debug)]
struct Collection {
    info: CollectionInfo,
    chunks: Vec<StoredChunk>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn store_type(&self) -> &'static str {
        "memory"
    }

    async fn collection_info(&self, collection: &str) -> Result<Option<CollectionInfo>, DomainError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map(|c| c.info.clone()))
    }

    async fn create_collection(&self, info: CollectionInfo) -> Result<(), DomainError> {
        let mut collections = self.collections.write().await;

        if let Some(existing) = collections.get(&info.name) {
            return existing
                .info
                .ensure_compatible(&info.embedding_id, info.dimensions);
        }

        collections.insert(
            info.name.clone(),
            Collection {
                info,
                chunks: Vec::new(),
            },
        );
        Ok(())
    }

    async fn add_chunks(&self, collection: &str, chunks: Vec<StoredChunk>) -> Result<usize, DomainError> {
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        for chunk in &chunks {
            entry.info.check_vector(&chunk.embedding)?;
        }

        let count = chunks.len();
        for chunk in chunks {
            match entry.chunks.iter_mut().find(|c| c.id == chunk.id) {
                Some(existing) => *existing = chunk,
                None => entry.chunks.push(chunk),
            }
        }

        Ok(count)
    }

    async fn replace_document(
        &self,
        collection: &str,
        document_id: &DocumentId,
        chunks: Vec<StoredChunk>,
    ) -> Result<usize, DomainError> {
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        for chunk in &chunks {
            entry.info.check_vector(&chunk.embedding)?;
            if &chunk.document_id != document_id {
                return Err(DomainError::validation(format!(
                    "Chunk {} does not belong to document {}",
                    chunk.id, document_id
                )));
            }
        }

        let before = entry.chunks.len();
        entry.chunks.retain(|chunk| &chunk.document_id != document_id);
        let removed = before - entry.chunks.len();
        entry.chunks.extend(chunks);

        Ok(removed)
    }

    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, DomainError> {
        let collections = self.collections.read().await;
        let entry = collections
            .get(collection)
            .ok_or_else(|| missing_collection(collection))?;

        entry.info.check_vector(embedding)?;

        let results = entry
            .chunks
            .iter()
            .map(|chunk| {
                Ok(QueryResult {
                    chunk_id: chunk.id.clone(),
                    document_id: chunk.document_id.clone(),
                    content: chunk.content.clone(),
                    score: cosine_similarity(embedding, &chunk.embedding)?,
                    metadata: chunk.metadata.clone(),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(top_k_by_score(results, top_k))
    }

    async fn chunk_count(&self, collection: &str) -> Result<usize, DomainError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |c| c.chunks.len()))
    }

    async fn document_count(&self, collection: &str) -> Result<usize, DomainError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |c| {
            c.chunks
                .iter()
                .map(|chunk| &chunk.document_id)
                .collect::<HashSet<_>>()
                .len()
        }))
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: &DocumentId,
    ) -> Result<usize, DomainError> {
        let mut collections = self.collections.write().await;
        let Some(entry) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = entry.chunks.len();
        entry.chunks.retain(|chunk| &chunk.document_id != document_id);

        Ok(before - entry.chunks.len())
    }

    async fn list_sources(&self, collection: &str) -> Result<Vec<SourceInfo>, DomainError> {
        let collections = self.collections.read().await;
        let mut sources: BTreeMap<String, usize> = BTreeMap::new();

        if let Some(entry) = collections.get(collection) {
            for chunk in &entry.chunks {
                *sources.entry(source_of(&chunk.metadata)).or_insert(0) += 1;
            }
        }

        Ok(sources
            .into_iter()
            .map(|(source, chunk_count)| SourceInfo {
                source,
                chunk_count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Metadata;

    fn chunk(doc: &str, index: usize, source: &str, embedding: Vec<f32>) -> StoredChunk {
        let document_id = DocumentId::new(doc).unwrap();
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), source.to_string());

        StoredChunk {
            id: document_id.chunk_id(index),
            document_id,
            content: format!("{} chunk {}", doc, index),
            metadata,
            embedding,
        }
    }

    async fn store() -> InMemoryVectorStore {
        let store = InMemoryVectorStore::new();
        store
            .create_collection(CollectionInfo::new("kb", "test-2", 2))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_query_orders_by_similarity() {
        let store = store().await;
        store
            .add_chunks(
                "kb",
                vec![
                    chunk("a", 0, "alpha", vec![1.0, 0.0]),
                    chunk("b", 0, "beta", vec![0.0, 1.0]),
                    chunk("c", 0, "gamma", vec![0.7, 0.7]),
                ],
            )
            .await
            .unwrap();

        let results = store.query("kb", &[1.0, 0.1], 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk_id, "a_chunk_0");
        assert_eq!(results[1].chunk_id, "c_chunk_0");
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_add_replaces_same_chunk_id() {
        let store = store().await;
        store
            .add_chunks("kb", vec![chunk("a", 0, "alpha", vec![1.0, 0.0])])
            .await
            .unwrap();
        store
            .add_chunks("kb", vec![chunk("a", 0, "alpha-v2", vec![0.0, 1.0])])
            .await
            .unwrap();

        assert_eq!(store.chunk_count("kb").await.unwrap(), 1);
        let sources = store.list_sources("kb").await.unwrap();
        assert_eq!(sources[0].source, "alpha-v2");
    }

    #[tokio::test]
    async fn test_replace_document_drops_stale_chunks() {
        let store = store().await;
        store
            .add_chunks(
                "kb",
                vec![
                    chunk("doc", 0, "old", vec![1.0, 0.0]),
                    chunk("doc", 1, "old", vec![1.0, 0.0]),
                    chunk("doc", 2, "old", vec![1.0, 0.0]),
                    chunk("other", 0, "other", vec![0.0, 1.0]),
                ],
            )
            .await
            .unwrap();

        let removed = store
            .replace_document(
                "kb",
                &DocumentId::new("doc").unwrap(),
                vec![chunk("doc", 0, "new", vec![0.0, 1.0])],
            )
            .await
            .unwrap();

        assert_eq!(removed, 3);
        assert_eq!(store.chunk_count("kb").await.unwrap(), 2);
        let results = store.query("kb", &[1.0, 0.0], 10).await.unwrap();
        assert!(results.iter().all(|r| r.source() != Some("old")));
    }

    #[tokio::test]
    async fn test_replace_document_rejects_foreign_chunk() {
        let store = store().await;

        let err = store
            .replace_document(
                "kb",
                &DocumentId::new("doc").unwrap(),
                vec![chunk("other", 0, "other", vec![0.0, 1.0])],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(store.chunk_count("kb").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected() {
        let store = store().await;

        let err = store
            .add_chunks("kb", vec![chunk("a", 0, "alpha", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap_err();
        assert!(err.is_configuration());

        let err = store.query("kb", &[1.0, 0.0, 0.0], 3).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_recreate_with_other_embedding_fails() {
        let store = store().await;

        assert!(store
            .create_collection(CollectionInfo::new("kb", "test-2", 2))
            .await
            .is_ok());

        let err = store
            .create_collection(CollectionInfo::new("kb", "hashing-384", 384))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_missing_collection() {
        let store = InMemoryVectorStore::new();

        assert!(store.collection_info("nope").await.unwrap().is_none());
        assert_eq!(store.chunk_count("nope").await.unwrap(), 0);
        assert!(store.query("nope", &[1.0], 1).await.unwrap_err().is_retrieval());
    }

    #[tokio::test]
    async fn test_delete_and_counts() {
        let store = store().await;
        store
            .add_chunks(
                "kb",
                vec![
                    chunk("a", 0, "alpha", vec![1.0, 0.0]),
                    chunk("a", 1, "alpha", vec![0.9, 0.1]),
                    chunk("b", 0, "beta", vec![0.0, 1.0]),
                ],
            )
            .await
            .unwrap();

        assert_eq!(store.document_count("kb").await.unwrap(), 2);

        let sources = store.list_sources("kb").await.unwrap();
        assert_eq!(
            sources,
            vec![
                SourceInfo {
                    source: "alpha".to_string(),
                    chunk_count: 2
                },
                SourceInfo {
                    source: "beta".to_string(),
                    chunk_count: 1
                },
            ]
        );

        let removed = store
            .delete_document("kb", &DocumentId::new("a").unwrap())
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.chunk_count("kb").await.unwrap(), 1);
        assert_eq!(store.document_count("kb").await.unwrap(), 1);
    }
}
