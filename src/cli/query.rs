use clap::Args;

use super::CliContext;
use crate::domain::interpret_similarity;
use crate::domain::rag::source_label;

#[derive(Args, Clone)]
pub struct QueryArgs {
    /// Query text
    pub text: String,

    /// Number of passages (overrides config)
    #[arg(long)]
    pub top_k: Option<usize>,
}

pub async fn run(ctx: &CliContext, args: QueryArgs) -> anyhow::Result<()> {
    let kb = ctx.knowledge_base().await?;
    let top_k = args.top_k.unwrap_or(ctx.config.knowledge_base.top_k);

    let results = kb.query(&args.text, top_k).await?;

    ctx.emit(&results, || {
        results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                format!(
                    "[{}] {:.3} ({}) {}\n{}",
                    i + 1,
                    result.score,
                    interpret_similarity(result.score),
                    source_label(result),
                    result.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    })
}
