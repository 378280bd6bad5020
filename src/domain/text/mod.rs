//! Text cleaning and tokenization

mod cleaner;

pub use cleaner::{normalize_whitespace, CleanerOptions, TextCleaner};
