//! FAQ entries and match results

use serde::Serialize;

/// A question/answer pair with the embedding it is matched on
#[derive(Debug, Clone, PartialEq)]
pub struct FaqEntry {
    pub question: String,
    /// Expanded matching terms of the question
    pub question_terms: String,
    pub answer: String,
    pub embedding: Vec<f32>,
}

/// Outcome of looking up a question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FaqAnswer {
    /// Best entry scored at or above the threshold
    Match {
        question: String,
        answer: String,
        confidence: f32,
    },
    /// Nothing scored high enough; 0.0 when no FAQs are loaded
    NoMatch { best_confidence: f32 },
}

impl FaqAnswer {
    pub const NO_MATCH_MESSAGE: &'static str =
        "I couldn't find a good answer to that question. Could you rephrase it?";

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    pub fn confidence(&self) -> f32 {
        match self {
            Self::Match { confidence, .. } => *confidence,
            Self::NoMatch { best_confidence } => *best_confidence,
        }
    }

    /// Text to show the user
    pub fn answer_text(&self) -> &str {
        match self {
            Self::Match { answer, .. } => answer,
            Self::NoMatch { .. } => Self::NO_MATCH_MESSAGE,
        }
    }
}

/// Parse a `question|answer` line; blank or malformed lines yield `None`
pub fn parse_faq_line(line: &str) -> Option<(String, String)> {
    let (question, answer) = line.trim().split_once('|')?;
    let (question, answer) = (question.trim(), answer.trim());

    if question.is_empty() || answer.is_empty() {
        return None;
    }

    Some((question.to_string(), answer.to_string()))
}
