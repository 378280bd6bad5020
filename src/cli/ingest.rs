use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::info;

use super::CliContext;
use crate::domain::{DocumentId, Metadata};
use crate::infrastructure::llm::HttpClient;
use crate::infrastructure::services::IngestedDocument;
use crate::infrastructure::web::WebFetcher;

#[derive(Args, Clone)]
#[command(group = clap::ArgGroup::new("input").required(true).multiple(true).args(["files", "url", "text"]))]
pub struct IngestArgs {
    /// Text, Markdown or HTML files
    pub files: Vec<PathBuf>,

    /// Web pages to fetch
    #[arg(long)]
    pub url: Vec<String>,

    /// Inline text
    #[arg(long)]
    pub text: Option<String>,

    /// `source` metadata for inline text
    #[arg(long, default_value = "cli")]
    pub source: String,

    /// Document id for inline text
    #[arg(long, requires = "text")]
    pub id: Option<String>,
}

pub async fn run(ctx: &CliContext, args: IngestArgs) -> anyhow::Result<()> {
    let kb = ctx.knowledge_base().await?;
    let mut ingested: Vec<IngestedDocument> = Vec::new();

    for path in &args.files {
        ingested.push(kb.add_file(path).await?);
    }

    if !args.url.is_empty() {
        let timeout = Duration::from_secs(ctx.config.generation.timeout_secs);
        let fetcher = WebFetcher::new(HttpClient::with_timeout(timeout)?);
        for url in &args.url {
            ingested.push(kb.add_url(&fetcher, url).await?);
        }
    }

    if let Some(text) = &args.text {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), args.source.clone());

        let document_id = match &args.id {
            Some(id) => DocumentId::new(id.as_str())?,
            None => DocumentId::generate(),
        };
        let chunk_ids = kb
            .add_document_with_id(document_id.clone(), text, metadata)
            .await?;

        ingested.push(IngestedDocument {
            document_id,
            source: Some(args.source.clone()),
            chunk_ids,
        });
    }

    let total_chunks: usize = ingested.iter().map(|d| d.chunk_ids.len()).sum();
    info!(documents = ingested.len(), chunks = total_chunks, "Ingestion finished");

    ctx.emit(&ingested, || {
        ingested
            .iter()
            .map(|doc| {
                format!(
                    "Added {} ({}) as {} chunk(s)",
                    doc.document_id,
                    doc.source.as_deref().unwrap_or("-"),
                    doc.chunk_ids.len()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}
