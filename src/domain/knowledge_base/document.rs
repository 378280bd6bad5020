//! Documents and their identifiers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::validation::validate_document_id;
use crate::domain::DomainError;

/// String metadata attached to documents and chunks
pub type Metadata = BTreeMap<String, String>;

/// Document identifier, caller supplied or a generated UUID v4
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id after validation
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_document_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the chunk at `index` within this document
    pub fn chunk_id(&self, index: usize) -> String {
        format!("{}_chunk_{}", self.0, index)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw text plus metadata, immutable once ingested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with a generated id
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: DocumentId::generate(),
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = id;
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Merge metadata entries, overriding existing keys
    pub fn with_all_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata.extend(metadata);
        self
    }

    /// The `source` metadata entry, if any
    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").map(String::as_str)
    }
}
