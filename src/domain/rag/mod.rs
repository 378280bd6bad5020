//! Retrieval-augmented generation domain

mod answer;
mod prompt;

pub use answer::{GenerationStatus, RagAnswer};
pub use prompt::{build_prompt, format_context, source_label, unavailable_placeholder};
