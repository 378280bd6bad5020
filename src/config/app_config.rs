use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::ChunkingConfig;

/// Environment variable consulted when `generation.api_key` is unset
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub knowledge_base: KnowledgeBaseSettings,
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
    pub faq: FaqSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where chunks are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseSettings {
    pub backend: StoreBackend,
    /// SQLite database file, ignored by the memory backend
    pub path: PathBuf,
    pub collection: String,
    pub chunking: ChunkingConfig,
    pub top_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingStrategy {
    #[default]
    Hashing,
    Gemini,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub strategy: EmbeddingStrategy,
    /// Vector size of the hashing embedding
    pub dimensions: usize,
    /// Gemini embedding model
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FaqSettings {
    pub threshold: f32,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for KnowledgeBaseSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: PathBuf::from("data/knowledge_base.db"),
            collection: "gdg_knowledge_base".to_string(),
            chunking: ChunkingConfig::default(),
            top_k: 3,
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            strategy: EmbeddingStrategy::default(),
            dimensions: 384,
            model: "text-embedding-004".to_string(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl Default for FaqSettings {
    fn default() -> Self {
        Self {
            threshold: 0.35,
            file: None,
        }
    }
}

impl GenerationSettings {
    /// The configured API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("RAG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_api_key_fallback(std::env::var(GEMINI_API_KEY_VAR).ok());

        Ok(app_config)
    }

    fn apply_api_key_fallback(&mut self, key: Option<String>) {
        if self.generation.api_key().is_none() {
            self.generation.api_key = key.filter(|k| !k.trim().is_empty());
        }
    }
}
