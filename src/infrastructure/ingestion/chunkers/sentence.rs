//! Sentence-based chunking strategy

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::ingestion::{chunker::helpers, ChunkingStrategy, Segment};

/// Chunking strategy that splits text by sentences
#[derive(Debug, Clone, Default)]
pub struct SentenceChunker;

impl SentenceChunker {
    /// Create a new sentence chunker
    pub fn new() -> Self {
        Self
    }

    fn sentence_ranges(text: &str) -> Vec<std::ops::Range<usize>> {
        text.split_sentence_bound_indices()
            .filter_map(|(offset, sentence)| {
                let trimmed = sentence.trim();
                if trimmed.is_empty() {
                    return None;
                }

                let start = offset + (sentence.len() - sentence.trim_start().len());
                Some(start..start + trimmed.len())
            })
            .collect()
    }
}

impl ChunkingStrategy for SentenceChunker {
    fn segment(&self, content: &str) -> Vec<Segment> {
        helpers::with_char_offsets(content, Self::sentence_ranges(content))
    }

    fn name(&self) -> &'static str {
        "sentence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{Chunk, ChunkUnit, ChunkingConfig};

    fn config(size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig::new(size, overlap).with_unit(ChunkUnit::Sentences)
    }

    #[test]
    fn test_sentence_chunking() {
        let chunker = SentenceChunker::new();
        let content = "First sentence. Second sentence. Third sentence. Fourth sentence.";

        let chunks: Vec<Chunk> = chunker.chunks(content, &config(2, 1)).unwrap().collect();
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();

        assert_eq!(
            contents,
            vec![
                "First sentence. Second sentence.",
                "Second sentence. Third sentence.",
                "Third sentence. Fourth sentence.",
            ]
        );
    }

    #[test]
    fn test_single_sentence() {
        let chunker = SentenceChunker::new();

        let chunks: Vec<Chunk> = chunker
            .chunks("  Just one sentence here.  ", &config(3, 0))
            .unwrap()
            .collect();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Just one sentence here.");
        assert_eq!(chunks[0].metadata.char_start, 2);
    }

    #[test]
    fn test_question_and_exclamation() {
        let chunker = SentenceChunker::new();

        let chunks: Vec<Chunk> = chunker
            .chunks("Is it free? Yes! Register today.", &config(1, 0))
            .unwrap()
            .collect();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].content, "Is it free?");
        assert_eq!(chunks[2].content, "Register today.");
    }
}
