use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use crate::config::AppConfig;
use crate::infrastructure::embedding::EmbeddingProviderFactory;
use crate::infrastructure::knowledge_base::VectorStoreFactory;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::services::KnowledgeBaseService;

/// Loaded configuration plus output preferences shared by every command
#[derive(Debug)]
pub struct CliContext {
    pub config: AppConfig,
    pub json: bool,
}

impl CliContext {
    /// Load `.env` and configuration, then start logging
    pub fn init(json: bool, collection: Option<String>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = AppConfig::load().context("Failed to load configuration")?;
        init_logging(&config.logging);

        if let Some(collection) = collection {
            config.knowledge_base.collection = collection;
        }

        Ok(Self { config, json })
    }

    /// Knowledge base over the configured store and embedding function
    pub async fn knowledge_base(&self) -> anyhow::Result<KnowledgeBaseService> {
        let store = VectorStoreFactory::create(&self.config.knowledge_base).await?;
        let embedder =
            EmbeddingProviderFactory::create(&self.config.embedding, &self.config.generation)?;

        Ok(KnowledgeBaseService::new(
            store,
            embedder,
            &self.config.knowledge_base.collection,
            self.config.knowledge_base.chunking.clone(),
        )?)
    }

    pub async fn shared_knowledge_base(&self) -> anyhow::Result<Arc<KnowledgeBaseService>> {
        Ok(Arc::new(self.knowledge_base().await?))
    }

    /// Print `value` as JSON, or the human rendering otherwise
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", human());
        }
        Ok(())
    }
}
