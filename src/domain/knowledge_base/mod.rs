//! Knowledge Base domain - documents, chunks and vector storage

mod document;
mod store;
mod validation;

pub use document::{Document, DocumentId, Metadata};
pub use store::{CollectionInfo, QueryResult, SourceInfo, StoredChunk, VectorStore};
pub use validation::{validate_collection_name, validate_document_id, MAX_ID_LENGTH};

#[cfg(test)]
pub use store::mock::MockVectorStore;
