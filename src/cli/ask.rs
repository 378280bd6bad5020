use clap::Args;

use super::CliContext;
use crate::domain::rag::source_label;
use crate::infrastructure::services::RagAgent;

#[derive(Args, Clone)]
pub struct AskArgs {
    /// Question to answer
    pub question: String,

    /// Number of passages to ground the answer on (overrides config)
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Persona prepended to the prompt
    #[arg(long)]
    pub persona: Option<String>,
}

pub async fn run(ctx: &CliContext, args: AskArgs) -> anyhow::Result<()> {
    let mut config = ctx.config.clone();
    if let Some(top_k) = args.top_k {
        config.knowledge_base.top_k = top_k;
    }

    let kb = ctx.shared_knowledge_base().await?;
    let mut agent = RagAgent::from_config(kb, &config)?;

    if let Some(persona) = args.persona {
        agent.set_persona(persona);
    }

    let answer = agent.answer(&args.question).await?;

    ctx.emit(&answer, || {
        let sources = answer
            .sources
            .iter()
            .enumerate()
            .map(|(i, s)| format!("  [{}] {} ({:.3})", i + 1, source_label(s), s.score))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{}\n\nSources:\n{}", answer.answer, sources)
    })
}
