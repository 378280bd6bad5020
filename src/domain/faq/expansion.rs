//! Stop-word removal and synonym expansion for FAQ matching

use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::domain::text::TextCleaner;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "is", "are", "am", "be", "to", "of", "in", "on", "at", "for", "with",
        "do", "does", "i", "you", "we", "they", "there", "can", "will", "it", "what", "how",
        "when", "where",
    ]
    .into_iter()
    .collect()
});

static SYNONYMS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("sign", &["register", "signup", "join", "enroll"][..]),
        ("register", &["sign", "signup", "join", "enroll"][..]),
        ("signup", &["sign", "register", "join", "enroll"][..]),
        ("pay", &["fee", "cost", "price", "money", "charge"][..]),
        ("fee", &["pay", "cost", "price", "money", "charge"][..]),
        ("cost", &["pay", "fee", "price", "money", "charge"][..]),
        ("start", &["schedule", "time", "begin", "when"][..]),
        ("time", &["schedule", "start", "when"][..]),
        ("when", &["time", "schedule", "start"][..]),
        ("where", &["venue", "location", "place"][..]),
        ("venue", &["where", "location", "place"][..]),
        ("location", &["where", "venue", "place"][..]),
    ])
});

/// Turns a question into the set of terms it is matched on
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryExpander {
    cleaner: TextCleaner,
}

impl QueryExpander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a cleaned token is ignored during matching
    pub fn is_stop_word(token: &str) -> bool {
        STOP_WORDS.contains(token)
    }

    /// Clean, drop stop words, then add synonyms.
    ///
    /// When every token is a stop word the raw tokens are kept instead, so a
    /// question never expands to nothing unless it has no words at all.
    pub fn expand(&self, text: &str) -> BTreeSet<String> {
        let tokens = self.cleaner.tokenize(text);

        let content: BTreeSet<String> = tokens
            .iter()
            .filter(|t| !Self::is_stop_word(t))
            .cloned()
            .collect();

        if content.is_empty() {
            return tokens.into_iter().collect();
        }

        let mut expanded = content.clone();
        for word in &content {
            if let Some(synonyms) = SYNONYMS.get(word.as_str()) {
                expanded.extend(synonyms.iter().map(|s| s.to_string()));
            }
        }

        expanded
    }

    /// Expanded terms joined into one embeddable string, in sorted order
    pub fn expanded_text(&self, text: &str) -> String {
        self.expand(text).into_iter().collect::<Vec<_>>().join(" ")
    }
}
