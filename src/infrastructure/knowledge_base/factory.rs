//! Vector store factory

use std::sync::Arc;

use crate::config::{KnowledgeBaseSettings, StoreBackend};
use crate::domain::knowledge_base::VectorStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryVectorStore;
use super::sqlite::SqliteVectorStore;

/// Factory for creating vector stores
#[derive(Debug)]
pub struct VectorStoreFactory;

impl VectorStoreFactory {
    /// Create the store selected by `knowledge_base.backend`
    pub async fn create(settings: &KnowledgeBaseSettings) -> Result<Arc<dyn VectorStore>, DomainError> {
        match settings.backend {
            StoreBackend::Memory => Ok(Self::create_in_memory()),
            StoreBackend::Sqlite => {
                let store = SqliteVectorStore::open(&settings.path).await?;
                Ok(Arc::new(store))
            }
        }
    }

    pub fn create_in_memory() -> Arc<dyn VectorStore> {
        Arc::new(InMemoryVectorStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_backend() {
        let settings = KnowledgeBaseSettings {
            backend: StoreBackend::Memory,
            ..KnowledgeBaseSettings::default()
        };

        let store = VectorStoreFactory::create(&settings).await.unwrap();
        assert_eq!(store.store_type(), "memory");
    }

    #[tokio::test]
    async fn test_sqlite_backend_creates_file() {
        let dir = TempDir::new().unwrap();
        let settings = KnowledgeBaseSettings {
            backend: StoreBackend::Sqlite,
            path: dir.path().join("data").join("kb.db"),
            ..KnowledgeBaseSettings::default()
        };

        let store = VectorStoreFactory::create(&settings).await.unwrap();

        assert_eq!(store.store_type(), "sqlite");
        assert!(settings.path.exists());
    }
}
