//! Text normalization used before chunking and similarity comparison

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9\s]").expect("static punctuation pattern is valid")
});

/// Options controlling how aggressively text is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanerOptions {
    /// Lower-case the text
    #[serde(default = "default_true")]
    pub lowercase: bool,
    /// Remove every character that is not an ASCII letter, digit or whitespace
    #[serde(default = "default_true")]
    pub strip_punctuation: bool,
}

fn default_true() -> bool {
    true
}

impl CleanerOptions {
    /// Only trim and collapse whitespace, keeping case and punctuation
    pub fn whitespace_only() -> Self {
        Self {
            lowercase: false,
            strip_punctuation: false,
        }
    }
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            strip_punctuation: true,
        }
    }
}

/// Normalizes raw text: lower-casing, punctuation stripping, whitespace collapsing
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner {
    options: CleanerOptions,
}

impl TextCleaner {
    /// Create a cleaner with the default (full) normalization
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cleaner with custom options
    pub fn with_options(options: CleanerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CleanerOptions {
        self.options
    }

    /// Clean text according to the configured options
    pub fn clean_text(&self, text: &str) -> String {
        let mut cleaned = if self.options.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        if self.options.strip_punctuation {
            cleaned = NON_ALPHANUMERIC.replace_all(&cleaned, "").into_owned();
        }

        normalize_whitespace(&cleaned)
    }

    /// Clean the text and split it into word tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.clean_text(text)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Number of words after cleaning
    pub fn word_count(&self, text: &str) -> usize {
        self.tokenize(text).len()
    }
}

/// Trim both ends and collapse internal whitespace runs into single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean_text("  Hello, World!!!  "), "hello world");
    }

    #[test]
    fn test_clean_text_strips_symbols() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean_text("Email: support@gdg.dev"), "email supportgdgdev");
        assert_eq!(
            cleaner.clean_text("Price: $99.99 (AMAZING Deal!!!)"),
            "price 9999 amazing deal"
        );
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean_text("Python     is \n\t AWESOME!!!"), "python is awesome");
    }

    #[test]
    fn test_clean_text_trims_after_stripping() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean_text("hi !"), "hi");
    }

    #[test]
    fn test_clean_text_empty() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean_text(""), "");
        assert_eq!(cleaner.clean_text("  !!! ... "), "");
    }

    #[test]
    fn test_whitespace_only_keeps_case_and_punctuation() {
        let cleaner = TextCleaner::with_options(CleanerOptions::whitespace_only());
        assert_eq!(
            cleaner.clean_text("  GDG events   are free.\n\nRegister now! "),
            "GDG events are free. Register now!"
        );
    }

    #[test]
    fn test_keep_punctuation_but_lowercase() {
        let cleaner = TextCleaner::with_options(CleanerOptions {
            lowercase: true,
            strip_punctuation: false,
        });
        assert_eq!(cleaner.clean_text("Hello, World!"), "hello, world!");
    }

    #[test]
    fn test_tokenize_and_word_count() {
        let cleaner = TextCleaner::new();
        assert_eq!(
            cleaner.tokenize("Check out: https://gdg.community.dev"),
            vec!["check", "out", "httpsgdgcommunitydev"]
        );
        assert_eq!(cleaner.word_count("Python     is     AWESOME!!!"), 3);
        assert!(cleaner.tokenize("   ").is_empty());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world  \n\t test  "), "hello world test");
    }
}
