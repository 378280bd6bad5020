//! CLI module for the RAG workbook
//!
//! Each subcommand maps onto one library operation:
//! - `clean`: normalize text the way matching sees it
//! - `ingest`: add files, web pages or inline text to the knowledge base
//! - `query`: nearest passages for a text
//! - `ask`: retrieval-augmented answer
//! - `faq`: match a question against an FAQ file
//! - `sources`: list ingested sources
//! - `delete`: remove a document

pub mod ask;
pub mod clean;
mod context;
pub mod delete;
pub mod faq;
pub mod ingest;
pub mod query;
pub mod sources;

pub use context::CliContext;

use clap::{Parser, Subcommand};

/// RAG workbook - text cleaning, vector knowledge base, FAQ matching and Gemini answers
#[derive(Parser)]
#[command(name = "rag-workbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Knowledge base collection (overrides config)
    #[arg(long, global = true)]
    pub collection: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean and tokenize text
    Clean(clean::CleanArgs),

    /// Add documents to the knowledge base
    Ingest(ingest::IngestArgs),

    /// Show the passages closest to a query
    Query(query::QueryArgs),

    /// Answer a question from the knowledge base
    Ask(ask::AskArgs),

    /// Find the best FAQ answer for a question
    Faq(faq::FaqArgs),

    /// List ingested sources with their chunk counts
    Sources,

    /// Delete a document and all of its chunks
    Delete(delete::DeleteArgs),
}

/// Run the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext::init(cli.json, cli.collection)?;

    match cli.command {
        Command::Clean(args) => clean::run(&ctx, args),
        Command::Ingest(args) => ingest::run(&ctx, args).await,
        Command::Query(args) => query::run(&ctx, args).await,
        Command::Ask(args) => ask::run(&ctx, args).await,
        Command::Faq(args) => faq::run(&ctx, args).await,
        Command::Sources => sources::run(&ctx).await,
        Command::Delete(args) => delete::run(&ctx, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rag-workbook", "query", "When do workshops run?", "--json", "--top-k", "2"])
            .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.text, "When do workshops run?");
                assert_eq!(args.top_k, Some(2));
            }
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn test_ingest_requires_input() {
        assert!(Cli::try_parse_from(["rag-workbook", "ingest"]).is_err());
        assert!(Cli::try_parse_from(["rag-workbook", "ingest", "notes.md"]).is_ok());
        assert!(Cli::try_parse_from(["rag-workbook", "ingest", "--text", "GDG events are free."]).is_ok());
    }
}
