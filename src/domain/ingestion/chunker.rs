//! Chunking strategy trait and types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::Range;
use std::sync::Arc;

use crate::domain::knowledge_base::Metadata;
use crate::domain::DomainError;

/// Unit in which chunk size and overlap are measured
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChunkUnit {
    /// Unicode scalar values
    #[default]
    Characters,
    /// Whitespace separated tokens
    Words,
    /// Unicode sentences
    Sentences,
}

impl ChunkUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Words => "words",
            Self::Sentences => "sentences",
        }
    }
}

/// Configuration for chunking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Number of units per chunk
    pub chunk_size: usize,
    /// Units shared between consecutive chunks
    pub chunk_overlap: usize,
    /// Unit of measure for size and overlap
    #[serde(default)]
    pub unit: ChunkUnit,
}

impl ChunkingConfig {
    /// Create a new character based chunking configuration
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            unit: ChunkUnit::Characters,
        }
    }

    /// Set the unit of measure
    pub fn with_unit(mut self, unit: ChunkUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Distance between the starts of consecutive chunks
    pub fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::configuration(
                "chunk_size must be greater than 0",
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::configuration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
            unit: ChunkUnit::Characters,
        }
    }
}

/// Metadata for a chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Index of this chunk (0-based)
    pub chunk_index: usize,
    /// Total number of chunks produced from the document
    pub total_chunks: usize,
    /// Character offset where this chunk starts
    pub char_start: usize,
    /// Character offset where this chunk ends (exclusive)
    pub char_end: usize,
}

impl ChunkMetadata {
    /// Create new chunk metadata
    pub fn new(chunk_index: usize, total_chunks: usize, char_start: usize, char_end: usize) -> Self {
        Self {
            chunk_index,
            total_chunks,
            char_start,
            char_end,
        }
    }

    /// Convert to string metadata entries
    pub fn to_metadata(&self) -> Metadata {
        let mut map = Metadata::new();
        map.insert("chunk_index".to_string(), self.chunk_index.to_string());
        map.insert("total_chunks".to_string(), self.total_chunks.to_string());
        map.insert("char_start".to_string(), self.char_start.to_string());
        map.insert("char_end".to_string(), self.char_end.to_string());
        map
    }
}

/// A chunk of text extracted from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk content
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Get the chunk index
    pub fn index(&self) -> usize {
        self.metadata.chunk_index
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.metadata.char_end - self.metadata.char_start
    }

    /// Check if the chunk is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One chunking unit located in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Byte range in the source text
    pub bytes: Range<usize>,
    /// Character range in the source text
    pub chars: Range<usize>,
}

impl Segment {
    pub fn new(bytes: Range<usize>, chars: Range<usize>) -> Self {
        Self { bytes, chars }
    }
}

/// Lazy sequence of chunks over a text.
///
/// Windows of `chunk_size` segments advance by `chunk_size - chunk_overlap`
/// segments, so neighbours share exactly `chunk_overlap` segments. Cloning
/// restarts from the current position; `Chunks` is finite and knows its length.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text: &'a str,
    segments: Arc<[Segment]>,
    size: usize,
    step: usize,
    index: usize,
    total: usize,
}

impl<'a> Chunks<'a> {
    fn new(text: &'a str, segments: Vec<Segment>, config: &ChunkingConfig) -> Self {
        let size = config.chunk_size;
        let step = config.step();
        let count = segments.len();

        let total = if count == 0 {
            0
        } else if count <= size {
            1
        } else {
            1 + (count - size).div_ceil(step)
        };

        Self {
            text,
            segments: segments.into(),
            size,
            step,
            index: 0,
            total,
        }
    }

    /// Total number of chunks in the full sequence
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }

        let first = self.index * self.step;
        let last = (first + self.size).min(self.segments.len()) - 1;
        let start = &self.segments[first];
        let end = &self.segments[last];

        let chunk = Chunk::new(
            &self.text[start.bytes.start..end.bytes.end],
            ChunkMetadata::new(self.index, self.total, start.chars.start, end.chars.end),
        );

        self.index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

/// Trait for chunking strategies
///
/// A strategy only decides how text is cut into units; windowing and overlap
/// are shared by every strategy through [`ChunkingStrategy::chunks`].
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split content into ordered, non-overlapping units
    fn segment(&self, content: &str) -> Vec<Segment>;

    /// Get the strategy name
    fn name(&self) -> &'static str;

    /// Lazily split content into overlapping chunks
    fn chunks<'a>(
        &self,
        content: &'a str,
        config: &ChunkingConfig,
    ) -> Result<Chunks<'a>, DomainError> {
        config.validate()?;
        Ok(Chunks::new(content, self.segment(content), config))
    }
}

/// Helper functions for chunking
pub mod helpers {
    use super::Segment;
    use std::ops::Range;

    /// Attach character offsets to sorted, non-overlapping byte ranges
    pub fn with_char_offsets(
        text: &str,
        byte_ranges: impl IntoIterator<Item = Range<usize>>,
    ) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut byte_cursor = 0;
        let mut char_cursor = 0;

        for range in byte_ranges {
            let char_start = char_cursor + text[byte_cursor..range.start].chars().count();
            let char_end = char_start + text[range.clone()].chars().count();

            byte_cursor = range.end;
            char_cursor = char_end;
            segments.push(Segment::new(range, char_start..char_end));
        }

        segments
    }

    /// Rebuild text from character chunks by dropping each later chunk's overlap
    pub fn reassemble(chunks: &[super::Chunk], overlap: usize) -> String {
        let mut text = String::new();

        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                text.push_str(&chunk.content);
            } else {
                text.extend(chunk.content.chars().skip(overlap));
            }
        }

        text
    }
}
