use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::CliContext;
use crate::domain::FaqAnswer;
use crate::infrastructure::embedding::EmbeddingProviderFactory;
use crate::infrastructure::services::FaqFinder;

#[derive(Args, Clone)]
pub struct FaqArgs {
    /// Question to look up
    pub question: String,

    /// `question|answer` file (overrides config)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Minimum confidence for a match (overrides config)
    #[arg(long)]
    pub threshold: Option<f32>,
}

pub async fn run(ctx: &CliContext, args: FaqArgs) -> anyhow::Result<()> {
    let path = args
        .file
        .or_else(|| ctx.config.faq.file.clone())
        .context("No FAQ file given; pass --file or set faq.file")?;
    let threshold = args.threshold.unwrap_or(ctx.config.faq.threshold);

    let embedder =
        EmbeddingProviderFactory::create(&ctx.config.embedding, &ctx.config.generation)?;
    let mut finder = FaqFinder::new(embedder).with_threshold(threshold)?;
    finder.load_from_file(&path).await?;

    let answer = finder.find_answer(&args.question).await?;

    ctx.emit(&answer, || match &answer {
        FaqAnswer::Match {
            question,
            answer,
            confidence,
        } => format!("{}\n(matched \"{}\", confidence {:.2})", answer, question, confidence),
        FaqAnswer::NoMatch { best_confidence } => format!(
            "{}\n(best confidence {:.2})",
            FaqAnswer::NO_MATCH_MESSAGE,
            best_confidence
        ),
    })
}
