//! Infrastructure services

mod faq_service;
mod generation_service;
mod knowledge_base_service;
mod rag_agent;

pub use faq_service::{FaqFinder, DEFAULT_FAQ_THRESHOLD};
pub use generation_service::{Generator, GeneratorStats, Interaction, CHAT_WINDOW};
pub use knowledge_base_service::{IngestedDocument, KnowledgeBaseService};
pub use rag_agent::RagAgent;
