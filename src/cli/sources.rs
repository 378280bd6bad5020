use super::CliContext;

pub async fn run(ctx: &CliContext) -> anyhow::Result<()> {
    let kb = ctx.knowledge_base().await?;
    let sources = kb.list_sources().await?;
    let documents = kb.document_count().await?;

    ctx.emit(&sources, || {
        if sources.is_empty() {
            return format!("Collection '{}' is empty", kb.collection());
        }

        let mut lines: Vec<String> = sources
            .iter()
            .map(|s| format!("{:>6}  {}", s.chunk_count, s.source))
            .collect();
        lines.push(format!("{} document(s) in '{}'", documents, kb.collection()));
        lines.join("\n")
    })
}
