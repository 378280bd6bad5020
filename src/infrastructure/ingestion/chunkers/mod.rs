//! Chunking strategy implementations

mod fixed_size;
mod sentence;
mod word;

pub use fixed_size::FixedSizeChunker;
pub use sentence::SentenceChunker;
pub use word::WordChunker;
