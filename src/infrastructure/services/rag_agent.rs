//! Retrieval-augmented answering

use std::sync::Arc;

use tracing::{info, warn};

use super::generation_service::Generator;
use super::knowledge_base_service::KnowledgeBaseService;
use crate::config::AppConfig;
use crate::domain::rag::{build_prompt, unavailable_placeholder, GenerationStatus, RagAnswer};
use crate::domain::DomainError;
use crate::infrastructure::llm::LlmProviderFactory;

enum Backend {
    Ready(Generator),
    Unavailable(String),
}

/// Answers questions from the knowledge base, degrading to the retrieved
/// passages when no generator can be used
pub struct RagAgent {
    knowledge_base: Arc<KnowledgeBaseService>,
    backend: Backend,
    top_k: usize,
}

impl std::fmt::Debug for RagAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let generator = match &self.backend {
            Backend::Ready(generator) => generator.model().to_string(),
            Backend::Unavailable(reason) => format!("unavailable: {}", reason),
        };

        f.debug_struct("RagAgent")
            .field("knowledge_base", &self.knowledge_base)
            .field("generator", &generator)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl RagAgent {
    pub fn new(knowledge_base: Arc<KnowledgeBaseService>, generator: Generator, top_k: usize) -> Self {
        Self {
            knowledge_base,
            backend: Backend::Ready(generator),
            top_k,
        }
    }

    /// Agent that only retrieves, explaining why generation is off
    pub fn without_generator(
        knowledge_base: Arc<KnowledgeBaseService>,
        reason: impl Into<String>,
        top_k: usize,
    ) -> Self {
        Self {
            knowledge_base,
            backend: Backend::Unavailable(reason.into()),
            top_k,
        }
    }

    /// Build the generator from configuration; a missing API key leaves the
    /// agent in retrieval-only mode instead of failing
    pub fn from_config(
        knowledge_base: Arc<KnowledgeBaseService>,
        config: &AppConfig,
    ) -> Result<Self, DomainError> {
        let top_k = config.knowledge_base.top_k;

        match LlmProviderFactory::create(&config.generation) {
            Ok(provider) => {
                let generator = Generator::new(provider, &config.generation);
                Ok(Self::new(knowledge_base, generator, top_k))
            }
            Err(DomainError::GenerationUnavailable { message }) => {
                Ok(Self::without_generator(knowledge_base, message, top_k))
            }
            Err(e) => Err(e),
        }
    }

    /// Set the generator persona; ignored in retrieval-only mode
    pub fn set_persona(&mut self, persona: impl Into<String>) {
        if let Backend::Ready(generator) = &mut self.backend {
            generator.set_persona(persona);
        }
    }

    pub fn generator(&self) -> Option<&Generator> {
        match &self.backend {
            Backend::Ready(generator) => Some(generator),
            Backend::Unavailable(_) => None,
        }
    }

    /// Retrieve the closest passages and ask the generator to answer from them.
    ///
    /// Retrieval errors are returned; generation problems are reported in
    /// [`RagAnswer::generation`] with the sources still attached.
    pub async fn answer(&mut self, question: &str) -> Result<RagAnswer, DomainError> {
        if question.trim().is_empty() {
            return Err(DomainError::validation("Question cannot be empty"));
        }

        let sources = self.knowledge_base.query(question, self.top_k).await?;

        let (answer, generation) = match &mut self.backend {
            Backend::Unavailable(reason) => {
                warn!(reason = %reason, "Generation unavailable, returning retrieved passages");
                (
                    unavailable_placeholder(reason, &sources),
                    GenerationStatus::Unavailable {
                        reason: reason.clone(),
                    },
                )
            }
            Backend::Ready(generator) => {
                let prompt = build_prompt(question, &sources);
                match generator.generate(&prompt, None, None).await {
                    Ok(text) => (
                        text,
                        GenerationStatus::Generated {
                            model: generator.model().to_string(),
                        },
                    ),
                    Err(e) => {
                        warn!(error = %e, "Generation failed, returning sources only");
                        (
                            format!("Error calling Gemini API: {}", e),
                            GenerationStatus::Failed {
                                reason: e.to_string(),
                            },
                        )
                    }
                }
            }
        };

        info!(
            sources = sources.len(),
            generated = generation.is_generated(),
            "Answered question"
        );

        Ok(RagAnswer {
            answer,
            sources,
            generation,
        })
    }
}
