use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use crate::domain::DomainError;
use crate::infrastructure::ingestion::HtmlParser;
use crate::infrastructure::llm::HttpClientTrait;

/// Readable content of a fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedPage {
    pub url: String,
    pub title: Option<String>,
    pub text: String,
}

/// Downloads pages and reduces them to plain text
#[derive(Debug)]
pub struct WebFetcher<C: HttpClientTrait> {
    client: C,
}

impl<C: HttpClientTrait> WebFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// GET `url` and extract its title and visible text.
    ///
    /// Only `http` and `https` URLs are accepted; a page without any visible
    /// text is a validation error.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, DomainError> {
        let parsed = Url::parse(url)
            .map_err(|e| DomainError::validation(format!("Invalid URL '{}': {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::validation(format!(
                "Unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        let html = self.client.get_text(parsed.as_str()).await?;
        let extracted = HtmlParser::extract(&html);

        if extracted.text.is_empty() {
            return Err(DomainError::validation(format!(
                "No readable text found at {}",
                url
            )));
        }

        debug!(url, chars = extracted.text.chars().count(), "Fetched page");

        Ok(FetchedPage {
            url: url.to_string(),
            title: extracted.title,
            text: extracted.text,
        })
    }
}
