//! Knowledge base service: chunk lifecycle over a vector store

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::embedding::{EmbeddingInput, EmbeddingProvider};
use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy, ParserInput};
use crate::domain::knowledge_base::{
    validate_collection_name, CollectionInfo, Document, DocumentId, Metadata, QueryResult,
    SourceInfo, StoredChunk, VectorStore,
};
use crate::domain::{CleanerOptions, DomainError, TextCleaner};
use crate::infrastructure::ingestion::{ChunkerFactory, ParserFactory};
use crate::infrastructure::llm::HttpClientTrait;
use crate::infrastructure::web::WebFetcher;

/// Summary of one ingested document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestedDocument {
    pub document_id: DocumentId,
    pub source: Option<String>,
    pub chunk_ids: Vec<String>,
}

/// Cleans, chunks, embeds and stores documents, and answers similarity
/// queries over them. Every chunk of a collection is embedded by the same
/// embedding function; a collection recorded with another one is refused.
pub struct KnowledgeBaseService {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    chunker: Arc<dyn ChunkingStrategy>,
    chunking: ChunkingConfig,
    collection: String,
    normalizer: TextCleaner,
}

impl std::fmt::Debug for KnowledgeBaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBaseService")
            .field("store", &self.store.store_type())
            .field("embedding", &self.embedder.embedding_id())
            .field("chunker", &self.chunker.name())
            .field("collection", &self.collection)
            .finish()
    }
}

impl KnowledgeBaseService {
    /// Create a service over `collection`, validating the chunking settings up front
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        collection: impl Into<String>,
        chunking: ChunkingConfig,
    ) -> Result<Self, DomainError> {
        let collection = collection.into();
        validate_collection_name(&collection)?;
        chunking.validate()?;

        Ok(Self {
            store,
            embedder,
            chunker: ChunkerFactory::create(chunking.unit),
            chunking,
            collection,
            normalizer: TextCleaner::with_options(CleanerOptions::whitespace_only()),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }

    /// Add text with a generated id, returning the new chunk ids
    pub async fn add_document(&self, text: &str, metadata: Metadata) -> Result<Vec<String>, DomainError> {
        let document = Document::new(text).with_all_metadata(metadata);
        Ok(self.ingest(document).await?.chunk_ids)
    }

    /// Add text under a caller-chosen id, returning the new chunk ids
    pub async fn add_document_with_id(
        &self,
        id: DocumentId,
        text: &str,
        metadata: Metadata,
    ) -> Result<Vec<String>, DomainError> {
        let document = Document::new(text).with_id(id).with_all_metadata(metadata);
        Ok(self.ingest(document).await?.chunk_ids)
    }

    /// Parse a text, Markdown or HTML file and ingest it with `source` set to the file name
    pub async fn add_file(&self, path: &Path) -> Result<IngestedDocument, DomainError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DomainError::validation(format!("Invalid file path: {}", path.display())))?
            .to_string();

        let parser = ParserFactory::for_filename(&filename)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DomainError::not_found(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let parsed = parser
            .parse(ParserInput::from_bytes(bytes).with_filename(&filename))
            .await?;

        let document = Document::new(parsed.content).with_all_metadata(parsed.metadata.to_metadata());
        self.ingest(document).await
    }

    /// Fetch a web page and ingest its text with `source` set to the URL
    pub async fn add_url<C: HttpClientTrait>(
        &self,
        fetcher: &WebFetcher<C>,
        url: &str,
    ) -> Result<IngestedDocument, DomainError> {
        let page = fetcher.fetch(url).await?;

        let mut document = Document::new(page.text).with_metadata("source", page.url);
        if let Some(title) = page.title {
            document = document.with_metadata("title", title);
        }

        self.ingest(document).await
    }

    /// Normalize, chunk, embed and store a document. Chunks previously
    /// stored under the same document id are replaced as a whole.
    pub async fn ingest(&self, document: Document) -> Result<IngestedDocument, DomainError> {
        let content = self.normalizer.clean_text(&document.content);
        if content.is_empty() {
            return Err(DomainError::validation("Document content is empty"));
        }

        self.ensure_collection().await?;

        let chunks: Vec<_> = self.chunker.chunks(&content, &self.chunking)?.collect();
        debug!(
            document_id = %document.id,
            chunker = self.chunker.name(),
            chunks = chunks.len(),
            "Chunked document"
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed(EmbeddingInput::Batch(texts)).await?;

        if embeddings.len() != chunks.len() {
            return Err(DomainError::provider(
                self.embedder.provider_name(),
                format!(
                    "Expected {} embeddings, got {}",
                    chunks.len(),
                    embeddings.len()
                ),
            ));
        }

        let ingested_at = Utc::now().to_rfc3339();
        let stored: Vec<StoredChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                let mut metadata = document.metadata.clone();
                metadata.insert("document_id".to_string(), document.id.to_string());
                metadata.insert("ingested_at".to_string(), ingested_at.clone());
                metadata.extend(chunk.metadata.to_metadata());

                StoredChunk {
                    id: document.id.chunk_id(chunk.index()),
                    document_id: document.id.clone(),
                    content: chunk.content,
                    metadata,
                    embedding: embedding.into_vector(),
                }
            })
            .collect();

        let chunk_ids: Vec<String> = stored.iter().map(|c| c.id.clone()).collect();
        let replaced = self
            .store
            .replace_document(&self.collection, &document.id, stored)
            .await?;

        info!(
            collection = %self.collection,
            document_id = %document.id,
            chunks = chunk_ids.len(),
            replaced,
            "Added document to knowledge base"
        );

        Ok(IngestedDocument {
            source: document.source().map(str::to_string),
            document_id: document.id,
            chunk_ids,
        })
    }

    /// Nearest chunks to `text`, most similar first
    pub async fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult>, DomainError> {
        if top_k == 0 {
            return Err(DomainError::validation("top_k must be at least 1"));
        }

        let info = self.store.collection_info(&self.collection).await?.ok_or_else(|| {
            DomainError::retrieval(format!(
                "Knowledge base '{}' is empty; add documents first",
                self.collection
            ))
        })?;
        self.check_compatible(&info)?;

        if self.store.chunk_count(&self.collection).await? == 0 {
            return Err(DomainError::retrieval(format!(
                "Knowledge base '{}' is empty; add documents first",
                self.collection
            )));
        }

        let embedding = self.embedder.embed_text(text).await?;
        let results = self.store.query(&self.collection, &embedding, top_k).await?;

        info!(
            collection = %self.collection,
            top_k,
            results = results.len(),
            "Queried knowledge base"
        );

        Ok(results)
    }

    /// Remove every chunk of a document
    pub async fn delete_document(&self, id: &DocumentId) -> Result<usize, DomainError> {
        let removed = self.store.delete_document(&self.collection, id).await?;
        info!(collection = %self.collection, document_id = %id, removed, "Deleted document");
        Ok(removed)
    }

    pub async fn document_count(&self) -> Result<usize, DomainError> {
        self.store.document_count(&self.collection).await
    }

    pub async fn chunk_count(&self) -> Result<usize, DomainError> {
        self.store.chunk_count(&self.collection).await
    }

    pub async fn list_sources(&self) -> Result<Vec<SourceInfo>, DomainError> {
        self.store.list_sources(&self.collection).await
    }

    async fn ensure_collection(&self) -> Result<(), DomainError> {
        match self.store.collection_info(&self.collection).await? {
            Some(info) => self.check_compatible(&info),
            None => {
                self.store
                    .create_collection(CollectionInfo::new(
                        &self.collection,
                        self.embedder.embedding_id(),
                        self.embedder.dimensions(),
                    ))
                    .await
            }
        }
    }

    fn check_compatible(&self, info: &CollectionInfo) -> Result<(), DomainError> {
        info.ensure_compatible(&self.embedder.embedding_id(), self.embedder.dimensions())
    }
}
