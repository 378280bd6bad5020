//! Document parser trait and types

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::domain::knowledge_base::Metadata;
use crate::domain::DomainError;

/// Content input for document parsing
#[derive(Debug, Clone)]
pub enum ParserContent {
    /// Text content (already decoded)
    Text(String),
    /// Binary content (needs decoding)
    Bytes(Vec<u8>),
}

impl ParserContent {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn bytes(content: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(content.into())
    }

    /// Get content as text, decoding bytes as UTF-8 if necessary
    pub fn into_text(self) -> Result<String, DomainError> {
        match self {
            Self::Text(s) => Ok(s),
            Self::Bytes(b) => String::from_utf8(b)
                .map_err(|e| DomainError::validation(format!("Invalid UTF-8: {}", e))),
        }
    }
}

/// Input for document parsing
#[derive(Debug, Clone)]
pub struct ParserInput {
    /// Document content (text or bytes)
    pub content: ParserContent,
    /// Optional filename, recorded as the document source
    pub filename: Option<String>,
}

impl ParserInput {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: ParserContent::text(content),
            filename: None,
        }
    }

    pub fn from_bytes(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: ParserContent::bytes(content),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Metadata extracted from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    /// Source file or URL
    pub source: Option<String>,
    pub mime_type: Option<String>,
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Convert to string metadata entries, skipping unset fields
    pub fn to_metadata(&self) -> Metadata {
        let mut map = Metadata::new();

        if let Some(ref title) = self.title {
            map.insert("title".to_string(), title.clone());
        }

        if let Some(ref source) = self.source {
            map.insert("source".to_string(), source.clone());
        }

        if let Some(ref mime_type) = self.mime_type {
            map.insert("mime_type".to_string(), mime_type.clone());
        }

        map
    }
}

/// Result of parsing a document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Extracted text content
    pub content: String,
    /// Extracted metadata
    pub metadata: DocumentMetadata,
}

impl ParsedDocument {
    pub fn new(content: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

/// Trait for document parsers
#[async_trait]
pub trait DocumentParser: Send + Sync + Debug {
    /// Get supported file extensions (e.g., ["txt", "text"])
    fn supported_extensions(&self) -> &[&str];

    /// Parse a document and extract text content and metadata
    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError>;

    /// Check if this parser supports a given filename
    fn supports_file(&self, filename: &str) -> bool {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TxtOnly;

    #[async_trait]
    impl DocumentParser for TxtOnly {
        fn supported_extensions(&self) -> &[&str] {
            &["txt"]
        }

        async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
            Ok(ParsedDocument::new(
                input.content.into_text()?,
                DocumentMetadata::new(),
            ))
        }
    }

    #[test]
    fn test_parser_content_bytes() {
        let content = ParserContent::bytes(b"hello world".to_vec());
        assert_eq!(content.into_text().unwrap(), "hello world");
    }

    #[test]
    fn test_parser_content_invalid_utf8() {
        let content = ParserContent::bytes(vec![0xff, 0xfe]);
        assert!(matches!(
            content.into_text(),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_supports_file() {
        assert!(TxtOnly.supports_file("notes.TXT"));
        assert!(TxtOnly.supports_file("dir/notes.txt"));
        assert!(!TxtOnly.supports_file("notes.md"));
        assert!(!TxtOnly.supports_file("txt"));
    }

    #[test]
    fn test_document_metadata_to_metadata() {
        let meta = DocumentMetadata::new()
            .with_title("Test")
            .with_source("file.txt");

        let map = meta.to_metadata();
        assert_eq!(map.get("title").map(String::as_str), Some("Test"));
        assert_eq!(map.get("source").map(String::as_str), Some("file.txt"));
        assert!(!map.contains_key("mime_type"));
    }
}
