//! FAQ matching service

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::faq::{parse_faq_line, FaqAnswer, FaqEntry, QueryExpander};
use crate::domain::{cosine_similarity, DomainError};

/// Default minimum confidence for a match
pub const DEFAULT_FAQ_THRESHOLD: f32 = 0.35;

/// Finds the stored question closest to a user question.
///
/// Both sides go through the same stop-word removal and synonym expansion
/// before being embedded, so "sign up" and "register" land on shared terms.
pub struct FaqFinder {
    embedder: Arc<dyn EmbeddingProvider>,
    expander: QueryExpander,
    entries: Vec<FaqEntry>,
    threshold: f32,
}

impl std::fmt::Debug for FaqFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaqFinder")
            .field("embedding", &self.embedder.embedding_id())
            .field("entries", &self.entries.len())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl FaqFinder {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            expander: QueryExpander::new(),
            entries: Vec::new(),
            threshold: DEFAULT_FAQ_THRESHOLD,
        }
    }

    /// Set the match threshold, which must lie in `[0, 1]`
    pub fn with_threshold(mut self, threshold: f32) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DomainError::configuration(format!(
                "FAQ threshold must be between 0 and 1, got {}",
                threshold
            )));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub async fn add_faq(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<(), DomainError> {
        let question = question.into();
        let question_terms = self.expander.expanded_text(&question);
        let embedding = self.embedder.embed_text(&question_terms).await?;

        self.entries.push(FaqEntry {
            question,
            question_terms,
            answer: answer.into(),
            embedding,
        });
        Ok(())
    }

    /// Load `question|answer` lines, skipping blank and malformed ones.
    /// Returns how many entries were added.
    pub async fn load_from_file(&mut self, path: &Path) -> Result<usize, DomainError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::not_found(format!("Cannot read FAQ file {}: {}", path.display(), e))
        })?;

        let mut added = 0;
        for (line_no, line) in content.lines().enumerate() {
            match parse_faq_line(line) {
                Some((question, answer)) => {
                    self.add_faq(question, answer).await?;
                    added += 1;
                }
                None if !line.trim().is_empty() => {
                    debug!(line = line_no + 1, "Skipping malformed FAQ line");
                }
                None => {}
            }
        }

        info!(path = %path.display(), added, "Loaded FAQs");
        Ok(added)
    }

    /// Best entry by cosine similarity, or `NoMatch` below the threshold.
    /// A query sharing nothing with any entry (confidence 0) never matches.
    pub async fn find_answer(&self, query: &str) -> Result<FaqAnswer, DomainError> {
        if self.entries.is_empty() {
            return Ok(FaqAnswer::NoMatch {
                best_confidence: 0.0,
            });
        }

        let terms = self.expander.expanded_text(query);
        let query_embedding = self.embedder.embed_text(&terms).await?;

        let mut best: Option<(&FaqEntry, f32)> = None;
        for entry in &self.entries {
            let score = cosine_similarity(&query_embedding, &entry.embedding)?;
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((entry, score));
            }
        }

        let Some((entry, confidence)) = best else {
            return Ok(FaqAnswer::NoMatch {
                best_confidence: 0.0,
            });
        };

        debug!(query, matched = %entry.question, confidence, "Scored FAQ entries");

        if confidence <= 0.0 || confidence < self.threshold {
            return Ok(FaqAnswer::NoMatch {
                best_confidence: confidence.max(0.0),
            });
        }

        Ok(FaqAnswer::Match {
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::infrastructure::embedding::HashingEmbeddingProvider;
    use tempfile::TempDir;

    fn finder() -> FaqFinder {
        FaqFinder::new(Arc::new(HashingEmbeddingProvider::new(384).unwrap()))
    }

    async fn gdg_faqs() -> FaqFinder {
        let mut finder = finder();
        finder
            .add_faq("How do I register for the event?", "Register on the GDG community page.")
            .await
            .unwrap();
        finder
            .add_faq("Is there a registration fee?", "No, all GDG events are free.")
            .await
            .unwrap();
        finder
            .add_faq("Where is the venue?", "At the university main hall.")
            .await
            .unwrap();
        finder
            .add_faq("What time does the workshop start?", "Workshops start at 9:00.")
            .await
            .unwrap();
        finder
    }

    #[tokio::test]
    async fn test_synonyms_match_paraphrase() {
        let finder = gdg_faqs().await;

        let answer = finder.find_answer("How can I sign up?").await.unwrap();

        assert!(answer.is_match());
        assert_eq!(answer.answer_text(), "Register on the GDG community page.");
        assert!(answer.confidence() > 0.8);
    }

    #[tokio::test]
    async fn test_cost_question_finds_fee_entry() {
        let finder = gdg_faqs().await;

        let answer = finder.find_answer("How much does it cost?").await.unwrap();

        match answer {
            FaqAnswer::Match { question, .. } => {
                assert_eq!(question, "Is there a registration fee?")
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unrelated_question_is_no_match() {
        let finder = gdg_faqs().await;

        let answer = finder.find_answer("Tell me about quantum physics").await.unwrap();

        assert!(!answer.is_match());
        assert!(answer.confidence() < DEFAULT_FAQ_THRESHOLD);
        assert_eq!(answer.answer_text(), FaqAnswer::NO_MATCH_MESSAGE);
    }

    #[tokio::test]
    async fn test_threshold_controls_matching() {
        let strict = gdg_faqs().await.with_threshold(0.95).unwrap();

        let answer = strict.find_answer("How can I sign up?").await.unwrap();
        assert!(matches!(answer, FaqAnswer::NoMatch { best_confidence } if best_confidence > 0.8));

        assert!(finder().with_threshold(1.5).unwrap_err().is_configuration());
    }

    #[tokio::test]
    async fn test_zero_threshold_still_needs_overlap() {
        let lenient = gdg_faqs().await.with_threshold(0.0).unwrap();

        let answer = lenient.find_answer("Is it the?").await.unwrap();
        assert_eq!(answer, FaqAnswer::NoMatch { best_confidence: 0.0 });

        let answer = lenient.find_answer("Tell me about quantum physics").await.unwrap();
        assert!(!answer.is_match());

        assert!(lenient.find_answer("How can I sign up?").await.unwrap().is_match());
    }

    #[tokio::test]
    async fn test_no_faqs_loaded() {
        let answer = finder().find_answer("anything").await.unwrap();
        assert_eq!(answer, FaqAnswer::NoMatch { best_confidence: 0.0 });
    }

    #[tokio::test]
    async fn test_load_from_file_skips_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faqs.txt");
        std::fs::write(
            &path,
            "How do I register?|Use the community page.\n\nnot a faq line\n|missing question\nWhere is the venue?|Main hall\n",
        )
        .unwrap();

        let mut finder = finder();
        let added = finder.load_from_file(&path).await.unwrap();

        assert_eq!(added, 2);
        assert_eq!(finder.len(), 2);
        assert_eq!(finder.entries()[1].answer, "Main hall");
        assert_eq!(finder.entries()[1].question_terms, "location place venue where");
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let mut finder = finder();

        let err = finder
            .load_from_file(&dir.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_embedding_error_propagates() {
        let mut finder = FaqFinder::new(Arc::new(
            MockEmbeddingProvider::new("mock", 8).with_error("offline"),
        ));

        assert!(finder.add_faq("q", "a").await.is_err());
    }
}
