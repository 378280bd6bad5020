mod app_config;

pub use app_config::{
    AppConfig, EmbeddingSettings, EmbeddingStrategy, FaqSettings, GenerationSettings,
    KnowledgeBaseSettings, LogFormat, LoggingConfig, StoreBackend, GEMINI_API_KEY_VAR,
};
