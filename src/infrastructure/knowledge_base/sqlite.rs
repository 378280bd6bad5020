//! SQLite-backed vector store.
//!
//! Chunks, their metadata (JSON) and embeddings (little-endian `f32` BLOBs)
//! live in a single database file. Search is brute-force cosine similarity
//! over the collection's rows.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tracing::debug;

use super::scoring::{missing_collection, source_of, top_k_by_score};
use crate::domain::knowledge_base::{
    CollectionInfo, DocumentId, QueryResult, SourceInfo, StoredChunk, VectorStore,
};
use crate::domain::{cosine_similarity, DomainError, Metadata};

#[derive(Debug, Clone)]
pub struct SqliteVectorStore {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteVectorStore {
    /// Open (or create) the database at `db_path`, creating parent directories
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await?;

        let store = Self { pool, db_path };
        store.init_schema().await?;

        debug!(path = %store.db_path.display(), "Opened SQLite vector store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn init_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS collections (
                name TEXT PRIMARY KEY,
                embedding_id TEXT NOT NULL,
                dimensions INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS chunks (
                id TEXT NOT NULL,
                collection TEXT NOT NULL REFERENCES collections(name),
                document_id TEXT NOT NULL,
                content TEXT NOT NULL,
                metadata TEXT NOT NULL DEFAULT '{}',
                embedding BLOB NOT NULL,
                PRIMARY KEY (collection, id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chunks_document ON chunks(collection, document_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn serialize_embedding(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_embedding(bytes: &[u8]) -> Result<Vec<f32>, DomainError> {
        if bytes.len() % 4 != 0 {
            return Err(DomainError::storage(format!(
                "Corrupt embedding blob of {} bytes",
                bytes.len()
            )));
        }

        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }

    fn parse_metadata(raw: &str) -> Result<Metadata, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::storage(format!("Corrupt chunk metadata: {}", e)))
    }

    fn serialize_metadata(metadata: &Metadata) -> Result<String, DomainError> {
        serde_json::to_string(metadata)
            .map_err(|e| DomainError::internal(format!("Failed to encode metadata: {}", e)))
    }

    async fn require_collection(&self, collection: &str) -> Result<CollectionInfo, DomainError> {
        self.collection_info(collection)
            .await?
            .ok_or_else(|| missing_collection(collection))
    }

    async fn insert_chunks(
        tx: &mut Transaction<'_, Sqlite>,
        collection: &str,
        chunks: &[StoredChunk],
    ) -> Result<(), DomainError> {
        for chunk in chunks {
            sqlx::query(
                "INSERT OR REPLACE INTO chunks (id, collection, document_id, content, metadata, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(&chunk.id)
            .bind(collection)
            .bind(chunk.document_id.as_str())
            .bind(&chunk.content)
            .bind(Self::serialize_metadata(&chunk.metadata)?)
            .bind(Self::serialize_embedding(&chunk.embedding))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    fn store_type(&self) -> &'static str {
        "sqlite"
    }

    async fn collection_info(&self, collection: &str) -> Result<Option<CollectionInfo>, DomainError> {
        let row = sqlx::query("SELECT name, embedding_id, dimensions FROM collections WHERE name = ?1")
            .bind(collection)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let dimensions: i64 = row.try_get("dimensions")?;
        Ok(Some(CollectionInfo::new(
            row.try_get::<String, _>("name")?,
            row.try_get::<String, _>("embedding_id")?,
            dimensions as usize,
        )))
    }

    async fn create_collection(&self, info: CollectionInfo) -> Result<(), DomainError> {
        if let Some(existing) = self.collection_info(&info.name).await? {
            return existing.ensure_compatible(&info.embedding_id, info.dimensions);
        }

        sqlx::query("INSERT INTO collections (name, embedding_id, dimensions) VALUES (?1, ?2, ?3)")
            .bind(&info.name)
            .bind(&info.embedding_id)
            .bind(info.dimensions as i64)
            .execute(&self.pool)
            .await?;

        debug!(collection = %info.name, embedding = %info.embedding_id, "Created collection");
        Ok(())
    }

    async fn add_chunks(&self, collection: &str, chunks: Vec<StoredChunk>) -> Result<usize, DomainError> {
        let info = self.require_collection(collection).await?;
        for chunk in &chunks {
            info.check_vector(&chunk.embedding)?;
        }

        if chunks.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        Self::insert_chunks(&mut tx, collection, &chunks).await?;
        tx.commit().await?;

        Ok(chunks.len())
    }

    async fn replace_document(
        &self,
        collection: &str,
        document_id: &DocumentId,
        chunks: Vec<StoredChunk>,
    ) -> Result<usize, DomainError> {
        let info = self.require_collection(collection).await?;
        for chunk in &chunks {
            info.check_vector(&chunk.embedding)?;
            if &chunk.document_id != document_id {
                return Err(DomainError::validation(format!(
                    "Chunk {} does not belong to document {}",
                    chunk.id, document_id
                )));
            }
        }

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM chunks WHERE collection = ?1 AND document_id = ?2")
            .bind(collection)
            .bind(document_id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        Self::insert_chunks(&mut tx, collection, &chunks).await?;

        tx.commit().await?;

        debug!(collection, document_id = %document_id, removed, added = chunks.len(), "Replaced document");
        Ok(removed as usize)
    }

    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, DomainError> {
        let info = self.require_collection(collection).await?;
        info.check_vector(embedding)?;

        let rows = sqlx::query(
            "SELECT id, document_id, content, metadata, embedding
             FROM chunks WHERE collection = ?1 ORDER BY rowid",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let blob: Vec<u8> = row.try_get("embedding")?;
            let vector = Self::deserialize_embedding(&blob)?;
            let document_id: String = row.try_get("document_id")?;
            let metadata: String = row.try_get("metadata")?;

            results.push(QueryResult {
                chunk_id: row.try_get("id")?,
                document_id: DocumentId::new(document_id)?,
                content: row.try_get("content")?,
                score: cosine_similarity(embedding, &vector)?,
                metadata: Self::parse_metadata(&metadata)?,
            });
        }

        Ok(top_k_by_score(results, top_k))
    }

    async fn chunk_count(&self, collection: &str) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks WHERE collection = ?1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    async fn document_count(&self, collection: &str) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT document_id) FROM chunks WHERE collection = ?1",
        )
        .bind(collection)
        .fetch_one(&self.pool)
        .await?;
        Ok(count as usize)
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: &DocumentId,
    ) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM chunks WHERE collection = ?1 AND document_id = ?2")
            .bind(collection)
            .bind(document_id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() as usize)
    }

    async fn list_sources(&self, collection: &str) -> Result<Vec<SourceInfo>, DomainError> {
        let rows = sqlx::query("SELECT metadata FROM chunks WHERE collection = ?1")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        let mut sources: BTreeMap<String, usize> = BTreeMap::new();
        for row in rows {
            let metadata: String = row.try_get("metadata")?;
            *sources
                .entry(source_of(&Self::parse_metadata(&metadata)?))
                .or_insert(0) += 1;
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
