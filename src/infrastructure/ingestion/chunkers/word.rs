//! Word-based chunking strategy

use crate::domain::ingestion::{chunker::helpers, ChunkingStrategy, Segment};

/// Chunking strategy whose unit is a whitespace separated token.
///
/// A chunk spans from its first token to its last token in the source, so the
/// whitespace between tokens is preserved as written.
#[derive(Debug, Clone, Default)]
pub struct WordChunker;

impl WordChunker {
    /// Create a new word chunker
    pub fn new() -> Self {
        Self
    }

    fn token_ranges(text: &str) -> Vec<std::ops::Range<usize>> {
        let mut ranges = Vec::new();
        let mut start: Option<usize> = None;

        for (i, c) in text.char_indices() {
            match (c.is_whitespace(), start) {
                (true, Some(s)) => {
                    ranges.push(s..i);
                    start = None;
                }
                (false, None) => start = Some(i),
                _ => {}
            }
        }

        if let Some(s) = start {
            ranges.push(s..text.len());
        }

        ranges
    }
}

impl ChunkingStrategy for WordChunker {
    fn segment(&self, content: &str) -> Vec<Segment> {
        helpers::with_char_offsets(content, Self::token_ranges(content))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{Chunk, ChunkUnit, ChunkingConfig};

    fn config(size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig::new(size, overlap).with_unit(ChunkUnit::Words)
    }

    #[test]
    fn test_word_windows_overlap() {
        let chunker = WordChunker::new();
        let text = "one two three four five six seven";

        let chunks: Vec<Chunk> = chunker.chunks(text, &config(3, 1)).unwrap().collect();
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();

        assert_eq!(
            contents,
            vec!["one two three", "three four five", "five six seven"]
        );
    }

    #[test]
    fn test_offsets_point_into_source() {
        let chunker = WordChunker::new();
        let text = "  alpha   beta\n gamma ";

        let chunks: Vec<Chunk> = chunker.chunks(text, &config(2, 0)).unwrap().collect();

        assert_eq!(chunks[0].content, "alpha   beta");
        assert_eq!(chunks[0].metadata.char_start, 2);
        assert_eq!(chunks[1].content, "gamma");

        let chars: Vec<char> = text.chars().collect();
        for chunk in &chunks {
            let slice: String = chars[chunk.metadata.char_start..chunk.metadata.char_end]
                .iter()
                .collect();
            assert_eq!(slice, chunk.content);
        }
    }

    #[test]
    fn test_whitespace_only_input_is_empty() {
        let chunker = WordChunker::new();
        assert_eq!(chunker.chunks(" \n\t ", &config(3, 1)).unwrap().len(), 0);
    }
}
