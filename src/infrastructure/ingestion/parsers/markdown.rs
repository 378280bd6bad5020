//! Markdown document parser

use async_trait::async_trait;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};

use crate::domain::ingestion::{DocumentMetadata, DocumentParser, ParsedDocument, ParserInput};
use crate::domain::DomainError;

/// Parser for Markdown files
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Create a new Markdown parser
    pub fn new() -> Self {
        Self
    }

    fn start_line(text: &mut String) {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
    }

    fn extract_text_and_title(markdown: &str) -> (String, Option<String>) {
        let mut text = String::new();
        let mut title: Option<String> = None;
        let mut heading: Option<(HeadingLevel, String)> = None;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::Heading(level, ..)) => {
                    Self::start_line(&mut text);
                    heading = Some((level, String::new()));
                }
                Event::End(Tag::Heading(..)) => {
                    if let Some((level, content)) = heading.take() {
                        let content = content.trim().to_string();
                        if level == HeadingLevel::H1 && title.is_none() {
                            title = Some(content.clone());
                        }
                        text.push_str(&content);
                        text.push('\n');
                    }
                }
                Event::Text(t) | Event::Code(t) => match heading {
                    Some((_, ref mut content)) => content.push_str(&t),
                    None => text.push_str(&t),
                },
                Event::SoftBreak | Event::HardBreak => match heading {
                    Some((_, ref mut content)) => content.push(' '),
                    None => text.push(' '),
                },
                Event::Start(Tag::Paragraph | Tag::Item | Tag::CodeBlock(_)) => {
                    Self::start_line(&mut text);
                }
                Event::End(Tag::Paragraph | Tag::Item | Tag::CodeBlock(_)) => {
                    Self::start_line(&mut text);
                }
                _ => {}
            }
        }

        let text = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        (text, title)
    }
}

#[async_trait]
impl DocumentParser for MarkdownParser {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
        let raw = input.content.into_text()?;
        let (content, title) = Self::extract_text_and_title(&raw);

        let mut metadata = DocumentMetadata::new().with_mime_type("text/markdown");

        if let Some(t) = title {
            metadata = metadata.with_title(t);
        }

        if let Some(filename) = input.filename {
            metadata = metadata.with_source(filename);
        }

        Ok(ParsedDocument::new(content, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_simple_markdown() {
        let parser = MarkdownParser::new();
        let input = ParserInput::from_text("# GDG Handbook\n\nEvents are **free** for students.");

        let result = parser.parse(input).await.unwrap();

        assert_eq!(result.content, "GDG Handbook\nEvents are free for students.");
        assert_eq!(result.metadata.title, Some("GDG Handbook".to_string()));
        assert_eq!(result.metadata.mime_type, Some("text/markdown".to_string()));
    }

    #[tokio::test]
    async fn test_parse_markdown_with_code_and_lists() {
        let parser = MarkdownParser::new();
        let input = ParserInput::from_text(
            "Some `inline code` here.\n\n- Item 1\n- Item 2\n\n```rust\nlet x = 1;\n```",
        );

        let result = parser.parse(input).await.unwrap();

        assert!(result.content.contains("inline code"));
        assert!(result.content.contains("Item 1\nItem 2"));
        assert!(result.content.contains("let x = 1;"));
    }

    #[tokio::test]
    async fn test_parse_markdown_without_h1() {
        let parser = MarkdownParser::new();
        let input = ParserInput::from_text("## Secondary Heading\n\nNo H1 here.");

        let result = parser.parse(input).await.unwrap();

        assert!(result.metadata.title.is_none());
        assert_eq!(result.content, "Secondary Heading\nNo H1 here.");
    }

    #[test]
    fn test_supported_extensions() {
        let parser = MarkdownParser::new();
        assert!(parser.supports_file("readme.md"));
        assert!(parser.supports_file("doc.markdown"));
        assert!(!parser.supports_file("file.txt"));
    }
}
