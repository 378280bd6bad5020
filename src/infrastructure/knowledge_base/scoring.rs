//! Ranking shared by the brute-force stores

use crate::domain::knowledge_base::QueryResult;
use crate::domain::{DomainError, Metadata};

/// Label for chunks ingested without a `source` entry
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Highest scores first, at most `top_k`; ties keep insertion order
pub fn top_k_by_score(mut results: Vec<QueryResult>, top_k: usize) -> Vec<QueryResult> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_k);
    results
}

pub fn source_of(metadata: &Metadata) -> String {
    metadata
        .get("source")
        .cloned()
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

pub fn missing_collection(collection: &str) -> DomainError {
    DomainError::retrieval(format!(
        "Collection '{}' has not been initialized",
        collection
    ))
}
