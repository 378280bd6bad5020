use clap::Args;

use super::CliContext;
use crate::domain::DocumentId;

#[derive(Args, Clone)]
pub struct DeleteArgs {
    /// Document id
    pub id: String,
}

pub async fn run(ctx: &CliContext, args: DeleteArgs) -> anyhow::Result<()> {
    let id = DocumentId::new(args.id)?;
    let kb = ctx.knowledge_base().await?;

    let removed = kb.delete_document(&id).await?;

    ctx.emit(&serde_json::json!({"document_id": id, "removed_chunks": removed}), || {
        if removed == 0 {
            format!("No chunks found for document '{}'", id)
        } else {
            format!("Removed {} chunk(s) of document '{}'", removed, id)
        }
    })
}
