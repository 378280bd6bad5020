//! Document ingestion infrastructure
//!
//! Parsers turn uploaded files into plain text; chunkers cut that text into
//! the units the knowledge base windows over.

pub mod chunkers;
pub mod factory;
pub mod parsers;

pub use chunkers::{FixedSizeChunker, SentenceChunker, WordChunker};
pub use factory::{ChunkerFactory, ParserFactory};
pub use parsers::{ExtractedHtml, HtmlParser, MarkdownParser, PlainTextParser};
