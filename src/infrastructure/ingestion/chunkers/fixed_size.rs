//! Fixed-size chunking strategy

use crate::domain::ingestion::{chunker::helpers, ChunkingStrategy, Segment};

/// Chunking strategy that splits text into fixed-size character windows
#[derive(Debug, Clone, Default)]
pub struct FixedSizeChunker;

impl FixedSizeChunker {
    /// Create a new fixed-size chunker
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for FixedSizeChunker {
    fn segment(&self, content: &str) -> Vec<Segment> {
        helpers::with_char_offsets(
            content,
            content.char_indices().map(|(i, c)| i..i + c.len_utf8()),
        )
    }

    fn name(&self) -> &'static str {
        "fixed_size"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{Chunk, ChunkingConfig};

    #[test]
    fn test_small_content_single_chunk() {
        let chunker = FixedSizeChunker::new();
        let config = ChunkingConfig::new(100, 10);

        let chunks: Vec<Chunk> = chunker.chunks("Hello world", &config).unwrap().collect();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello world");
        assert_eq!(chunks[0].metadata.total_chunks, 1);
    }

    #[test]
    fn test_large_content_multiple_chunks() {
        let chunker = FixedSizeChunker::new();
        let config = ChunkingConfig::new(50, 10);
        let content = "This is a test sentence. ".repeat(20);

        let chunks: Vec<Chunk> = chunker.chunks(&content, &config).unwrap().collect();

        assert!(chunks.len() > 1);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.content.chars().count(), 50);
        }
        assert_eq!(helpers::reassemble(&chunks, 10), content);
    }

    #[test]
    fn test_whitespace_is_kept() {
        let chunker = FixedSizeChunker::new();
        let config = ChunkingConfig::new(4, 0);

        let chunks: Vec<Chunk> = chunker.chunks(" a b ", &config).unwrap().collect();

        assert_eq!(chunks[0].content, " a b");
        assert_eq!(chunks[1].content, " ");
    }

    #[test]
    fn test_invalid_overlap() {
        let chunker = FixedSizeChunker::new();
        let err = chunker
            .chunks("abc", &ChunkingConfig::new(10, 12))
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
