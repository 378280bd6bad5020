//! Factory for creating parsers and chunkers

use std::sync::Arc;

use crate::domain::ingestion::{ChunkUnit, ChunkingStrategy, DocumentParser};
use crate::domain::DomainError;

use super::chunkers::{FixedSizeChunker, SentenceChunker, WordChunker};
use super::parsers::{HtmlParser, MarkdownParser, PlainTextParser};

/// Factory for creating document parsers
#[derive(Debug, Default)]
pub struct ParserFactory;

impl ParserFactory {
    /// All available parsers
    pub fn all() -> Vec<Arc<dyn DocumentParser>> {
        vec![
            Arc::new(PlainTextParser::new()),
            Arc::new(MarkdownParser::new()),
            Arc::new(HtmlParser::new()),
        ]
    }

    /// Pick the parser for a filename by its extension
    pub fn for_filename(filename: &str) -> Result<Arc<dyn DocumentParser>, DomainError> {
        Self::all()
            .into_iter()
            .find(|parser| parser.supports_file(filename))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Unsupported file type '{}'; expected one of: {}",
                    filename,
                    Self::supported_extensions().join(", ")
                ))
            })
    }

    /// Get a list of all supported file extensions
    pub fn supported_extensions() -> Vec<&'static str> {
        vec!["txt", "text", "md", "markdown", "html", "htm"]
    }
}

/// Factory for creating chunking strategies
#[derive(Debug, Default)]
pub struct ChunkerFactory;

impl ChunkerFactory {
    /// Create the chunker for a unit of measure
    pub fn create(unit: ChunkUnit) -> Arc<dyn ChunkingStrategy> {
        match unit {
            ChunkUnit::Characters => Arc::new(FixedSizeChunker::new()),
            ChunkUnit::Words => Arc::new(WordChunker::new()),
            ChunkUnit::Sentences => Arc::new(SentenceChunker::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_for_filename() {
        assert!(ParserFactory::for_filename("notes.txt").is_ok());
        assert!(ParserFactory::for_filename("README.md").is_ok());
        assert!(ParserFactory::for_filename("page.HTML").is_ok());

        let err = ParserFactory::for_filename("slides.pdf").unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(err.to_string().contains("slides.pdf"));
    }

    #[test]
    fn test_chunker_for_unit() {
        assert_eq!(ChunkerFactory::create(ChunkUnit::Characters).name(), "fixed_size");
        assert_eq!(ChunkerFactory::create(ChunkUnit::Words).name(), "word");
        assert_eq!(ChunkerFactory::create(ChunkUnit::Sentences).name(), "sentence");
    }
}
