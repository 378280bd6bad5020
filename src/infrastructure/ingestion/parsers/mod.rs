//! Document parser implementations

mod html;
mod markdown;
mod plain_text;

pub use html::{ExtractedHtml, HtmlParser};
pub use markdown::MarkdownParser;
pub use plain_text::PlainTextParser;
