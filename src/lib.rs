//! RAG workbook
//!
//! Building blocks for retrieval-augmented question answering:
//! - Text cleaning and chunking
//! - Deterministic hashing embeddings and Gemini embeddings
//! - A knowledge base over an in-memory or SQLite vector store
//! - FAQ matching with synonym expansion
//! - A Gemini generation wrapper and a RAG agent that falls back to the
//!   retrieved passages when generation is unavailable

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
