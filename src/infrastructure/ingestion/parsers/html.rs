//! HTML document parser

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::domain::ingestion::{DocumentMetadata, DocumentParser, ParsedDocument, ParserInput};
use crate::domain::DomainError;

/// Elements whose text never reaches the extracted content
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "head", "nav", "footer", "template"];

/// Elements that start a new line in the extracted content
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "h1", "h2", "h3", "h4", "h5", "h6", "br", "li",
    "tr", "td", "th", "blockquote", "pre",
];

/// Readable text and title pulled out of an HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedHtml {
    pub title: Option<String>,
    pub text: String,
}

/// Parser for HTML files and fetched web pages
#[derive(Debug, Clone, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Extract the page title and visible text
    pub fn extract(raw_html: &str) -> ExtractedHtml {
        let document = Html::parse_document(raw_html);

        ExtractedHtml {
            title: Self::extract_title(&document),
            text: Self::extract_text(&document),
        }
    }

    fn extract_title(document: &Html) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn extract_text(document: &Html) -> String {
        let body = Selector::parse("body")
            .ok()
            .and_then(|sel| document.select(&sel).next());

        let mut text = String::new();
        match body {
            Some(body) => Self::collect_text(&body, &mut text),
            None => Self::collect_text(&document.root_element(), &mut text),
        }

        text.lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_text(element: &ElementRef, out: &mut String) {
        for node in element.children() {
            if let Some(child) = ElementRef::wrap(node) {
                let tag = child.value().name();

                if SKIPPED_TAGS.contains(&tag) {
                    continue;
                }

                let is_block = BLOCK_TAGS.contains(&tag);
                if is_block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }

                Self::collect_text(&child, out);

                if is_block && !out.ends_with('\n') {
                    out.push('\n');
                }
            } else if let Some(txt) = node.value().as_text() {
                out.push_str(txt);
            }
        }
    }
}

#[async_trait]
impl DocumentParser for HtmlParser {
    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
        let raw = input.content.into_text()?;
        let extracted = Self::extract(&raw);

        let mut metadata = DocumentMetadata::new().with_mime_type("text/html");

        if let Some(title) = extracted.title {
            metadata = metadata.with_title(title);
        }

        if let Some(filename) = input.filename {
            metadata = metadata.with_source(filename);
        }

        Ok(ParsedDocument::new(extracted.text, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_simple_html() {
        let parser = HtmlParser::new();
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head><title>GDG Events</title></head>
            <body>
                <h1>Upcoming workshops</h1>
                <p>Workshops run   from 9:00 to 17:00.</p>
            </body>
            </html>
        "#;

        let result = parser
            .parse(ParserInput::from_text(html).with_filename("events.html"))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            "Upcoming workshops\nWorkshops run from 9:00 to 17:00."
        );
        assert_eq!(result.metadata.title, Some("GDG Events".to_string()));
        assert_eq!(result.metadata.source, Some("events.html".to_string()));
    }

    #[test]
    fn test_extract_skips_scripts_styles_and_nav() {
        let html = r#"
            <html>
            <head><style>.hidden { display: none; }</style></head>
            <body>
                <nav><a href="/">Home</a></nav>
                <p>Visible text</p>
                <script>var x = 'hidden';</script>
                <p>More visible text</p>
                <footer>Copyright</footer>
            </body>
            </html>
        "#;

        let extracted = HtmlParser::extract(html);

        assert_eq!(extracted.text, "Visible text\nMore visible text");
        assert!(extracted.title.is_none());
    }

    #[test]
    fn test_extract_lists_and_nesting() {
        let html = r#"
            <html><body>
                <ul><li>Item 1</li><li>Item 2</li></ul>
                <div><div><span>Deeply nested</span></div></div>
            </body></html>
        "#;

        let extracted = HtmlParser::extract(html);

        assert_eq!(extracted.text, "Item 1\nItem 2\nDeeply nested");
    }

    #[test]
    fn test_supported_extensions() {
        let parser = HtmlParser::new();
        assert!(parser.supports_file("page.html"));
        assert!(parser.supports_file("page.htm"));
        assert!(!parser.supports_file("file.txt"));
    }
}
