//! RAG answer types

use serde::Serialize;

use crate::domain::knowledge_base::QueryResult;

/// What happened to the generation step of an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationStatus {
    /// The model produced the answer
    Generated { model: String },
    /// No generator is configured, e.g. a missing API key
    Unavailable { reason: String },
    /// The generator was called and failed
    Failed { reason: String },
}

impl GenerationStatus {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

/// Answer text with the passages it was grounded on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<QueryResult>,
    pub generation: GenerationStatus,
}

impl RagAnswer {
    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }
}
