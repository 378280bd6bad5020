//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `DocumentParser` trait for turning uploaded files into plain text
//! - `ChunkingStrategy` trait for splitting documents into overlapping chunks

pub mod chunker;
pub mod parser;

pub use chunker::{
    Chunk, ChunkMetadata, ChunkUnit, Chunks, ChunkingConfig, ChunkingStrategy, Segment,
};
pub use parser::{DocumentMetadata, DocumentParser, ParsedDocument, ParserContent, ParserInput};
