//! Prompt assembly for retrieval-augmented answers

use crate::domain::knowledge_base::QueryResult;

const INSTRUCTIONS: &str = "You are a helpful assistant. Answer the question using only the \
numbered context passages below. Cite the passages you use as [1], [2], and so on. If the \
context does not contain the answer, say that you don't know.";

/// Label shown for a passage: its `source` metadata, or the chunk id
pub fn source_label(result: &QueryResult) -> &str {
    result.source().unwrap_or(&result.chunk_id)
}

/// Number each passage with its source
pub fn format_context(sources: &[QueryResult]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, result)| {
            format!(
                "[{}] (source: {})\n{}",
                i + 1,
                source_label(result),
                result.content.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full prompt sent to the generator
pub fn build_prompt(question: &str, sources: &[QueryResult]) -> String {
    format!(
        "{}\n\nContext:\n{}\n\nQuestion: {}\n\nAnswer:",
        INSTRUCTIONS,
        format_context(sources),
        question.trim()
    )
}

/// Answer text used when no generator is available
pub fn unavailable_placeholder(reason: &str, sources: &[QueryResult]) -> String {
    format!(
        "Generation unavailable ({}). Showing the {} most relevant passage(s) instead:\n\n{}",
        reason,
        sources.len(),
        format_context(sources)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge_base::{DocumentId, Metadata};

    fn result(chunk_id: &str, content: &str, source: Option<&str>) -> QueryResult {
        let mut metadata = Metadata::new();
        if let Some(source) = source {
            metadata.insert("source".to_string(), source.to_string());
        }

        QueryResult {
            chunk_id: chunk_id.to_string(),
            document_id: DocumentId::new("doc").unwrap(),
            content: content.to_string(),
            score: 0.4,
            metadata,
        }
    }

    #[test]
    fn test_format_context_numbers_sources() {
        let sources = vec![
            result("doc_chunk_0", "GDG events are free.", Some("quick")),
            result("doc_chunk_1", " Workshops run 9:00-17:00. ", None),
        ];

        assert_eq!(
            format_context(&sources),
            "[1] (source: quick)\nGDG events are free.\n\n[2] (source: doc_chunk_1)\nWorkshops run 9:00-17:00."
        );
    }

    #[test]
    fn test_build_prompt() {
        let sources = vec![result("doc_chunk_0", "GDG events are free.", Some("quick"))];

        let prompt = build_prompt("  Is it free? ", &sources);

        assert!(prompt.starts_with(INSTRUCTIONS));
        assert!(prompt.contains("Context:\n[1] (source: quick)\nGDG events are free."));
        assert!(prompt.ends_with("Question: Is it free?\n\nAnswer:"));
    }

    #[test]
    fn test_unavailable_placeholder() {
        let sources = vec![result("doc_chunk_0", "GDG events are free.", Some("quick"))];

        let text = unavailable_placeholder("GEMINI_API_KEY is not set", &sources);

        assert!(text.starts_with("Generation unavailable (GEMINI_API_KEY is not set)"));
        assert!(text.contains("[1] (source: quick)"));
    }
}
