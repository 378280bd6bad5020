//! FAQ matching domain

mod entry;
mod expansion;

pub use entry::{parse_faq_line, FaqAnswer, FaqEntry};
pub use expansion::QueryExpander;
