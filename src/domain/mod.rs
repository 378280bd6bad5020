//! Domain layer - Core types, traits and pure logic

pub mod embedding;
pub mod error;
pub mod faq;
pub mod ingestion;
pub mod knowledge_base;
pub mod llm;
pub mod rag;
pub mod text;

pub use embedding::{
    cosine_similarity, interpret_similarity, rank_by_similarity, Embedding, EmbeddingInput,
    EmbeddingProvider, RankedMatch, SimilarityLevel,
};
pub use error::DomainError;
pub use faq::{FaqAnswer, FaqEntry, QueryExpander};
pub use ingestion::{
    Chunk, ChunkMetadata, ChunkUnit, Chunks, ChunkingConfig, ChunkingStrategy, DocumentMetadata,
    DocumentParser, ParsedDocument, ParserInput,
};
pub use knowledge_base::{
    CollectionInfo, Document, DocumentId, Metadata, QueryResult, SourceInfo, StoredChunk,
    VectorStore,
};
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use rag::{GenerationStatus, RagAnswer};
pub use text::{CleanerOptions, TextCleaner};
