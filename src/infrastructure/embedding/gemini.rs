//! Gemini embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::{Embedding, EmbeddingInput, EmbeddingProvider};
use crate::domain::DomainError;
use crate::infrastructure::llm::DEFAULT_GEMINI_BASE_URL;

pub const DEFAULT_GEMINI_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Most requests `batchEmbedContents` accepts in one call
pub const MAX_EMBEDDING_BATCH: usize = 100;

/// Known Gemini embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("text-embedding-004", 768),
    ("embedding-001", 768),
    ("gemini-embedding-001", 3072),
];

/// Gemini `batchEmbedContents` provider
#[derive(Debug)]
pub struct GeminiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl<C: HttpClientTrait> GeminiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_base_url(client, api_key, model, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let model = model.into();
        let dimensions = model_dimensions(&model).ok_or_else(|| {
            DomainError::configuration(format!("Unknown Gemini embedding model '{}'", model))
        })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model,
            dimensions,
        })
    }

    fn embeddings_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:batchEmbedContents",
            self.base_url, self.model
        )
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, texts: &[&str]) -> serde_json::Value {
        let model = format!("models/{}", self.model);
        let requests: Vec<serde_json::Value> = texts
            .iter()
            .map(|text| {
                serde_json::json!({
                    "model": model,
                    "content": {"parts": [{"text": text}]},
                })
            })
            .collect();

        serde_json::json!({ "requests": requests })
    }

    fn parse_response(
        &self,
        json: serde_json::Value,
        expected: usize,
    ) -> Result<Vec<Embedding>, DomainError> {
        let response: BatchEmbedResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("gemini", format!("Failed to parse embedding response: {}", e))
        })?;

        if response.embeddings.len() != expected {
            return Err(DomainError::provider(
                "gemini",
                format!(
                    "Expected {} embeddings, got {}",
                    expected,
                    response.embeddings.len()
                ),
            ));
        }

        response
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(idx, e)| {
                if e.values.len() != self.dimensions {
                    return Err(DomainError::configuration(format!(
                        "Model '{}' returned {} dimensions, expected {}",
                        self.model,
                        e.values.len(),
                        self.dimensions
                    )));
                }
                Ok(Embedding::new(idx, e.values))
            })
            .collect()
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for GeminiEmbeddingProvider<C> {
    async fn embed(&self, input: EmbeddingInput) -> Result<Vec<Embedding>, DomainError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let texts = input.as_vec();
        let url = self.embeddings_url();
        let mut embeddings = Vec::with_capacity(texts.len());

        for (batch_no, batch) in texts.chunks(MAX_EMBEDDING_BATCH).enumerate() {
            let body = self.build_request(batch);
            let response = self
                .client
                .post_json(&url, self.headers(), &body)
                .await?;

            let offset = batch_no * MAX_EMBEDDING_BATCH;
            embeddings.extend(
                self.parse_response(response, batch.len())?
                    .into_iter()
                    .map(|e| Embedding::new(offset + e.index(), e.into_vector())),
            );
        }

        Ok(embeddings)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embedding_id(&self) -> String {
        format!("gemini-{}", self.model)
    }
}

fn model_dimensions(model: &str) -> Option<usize> {
    EMBEDDING_MODELS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, dims)| *dims)
}

// Gemini API types

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}
