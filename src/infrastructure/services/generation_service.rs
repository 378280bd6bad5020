//! Text generation with persona, short chat memory and call history

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GenerationSettings;
use crate::domain::llm::{LlmProvider, LlmRequest, Message};
use crate::domain::DomainError;

/// Chat turns kept in the prompt
pub const CHAT_WINDOW: usize = 10;

/// One recorded call, successful or not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub prompt: String,
    /// Generated text, or the error message when the call failed
    pub response: String,
    pub temperature: f32,
    pub model: String,
    /// Failed calls stay in the history so `stats` counts every attempt
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorStats {
    pub model: String,
    pub temperature: f32,
    pub total_interactions: usize,
    pub has_persona: bool,
}

/// Wraps an [`LlmProvider`] with the conveniences a workshop demo needs
pub struct Generator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    persona: Option<String>,
    history: Vec<Interaction>,
    transcript: Vec<Message>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("has_persona", &self.persona.is_some())
            .finish()
    }
}

impl Generator {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: &GenerationSettings) -> Self {
        Self {
            provider,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            persona: None,
            history: Vec::new(),
            transcript: Vec::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Persona sent as a `SYSTEM:` prefix on every prompt
    pub fn set_persona(&mut self, persona: impl Into<String>) {
        self.persona = Some(persona.into());
    }

    /// Generate text for a single prompt, falling back to the configured
    /// temperature and token limit
    pub async fn generate(
        &mut self,
        prompt: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, DomainError> {
        let full_prompt = match &self.persona {
            Some(persona) => format!(
                "{}\n\n{}",
                Message::system(persona),
                Message::user(prompt)
            ),
            None => prompt.to_string(),
        };

        self.send(full_prompt, temperature, max_tokens).await
    }

    /// Continue the conversation; the prompt carries the last
    /// [`CHAT_WINDOW`] turns and ends with `ASSISTANT:`
    pub async fn chat(&mut self, message: &str) -> Result<String, DomainError> {
        self.transcript.push(Message::user(message));

        let start = self.transcript.len().saturating_sub(CHAT_WINDOW);
        let mut turns: Vec<String> = Vec::with_capacity(CHAT_WINDOW + 2);
        if let Some(persona) = &self.persona {
            turns.push(Message::system(persona).to_string());
        }
        turns.extend(self.transcript[start..].iter().map(Message::to_string));
        turns.push("ASSISTANT:".to_string());

        match self.send(turns.join("\n\n"), None, None).await {
            Ok(reply) => {
                self.transcript.push(Message::assistant(&reply));
                Ok(reply)
            }
            Err(e) => {
                self.transcript.pop();
                Err(e)
            }
        }
    }

    /// Forget both the call history and the chat transcript
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.transcript.clear();
    }

    pub fn history(&self) -> &[Interaction] {
        &self.history
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn stats(&self) -> GeneratorStats {
        GeneratorStats {
            model: self.model.clone(),
            temperature: self.temperature,
            total_interactions: self.history.len(),
            has_persona: self.persona.is_some(),
        }
    }

    async fn send(
        &mut self,
        prompt: String,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, DomainError> {
        let temperature = temperature.unwrap_or(self.temperature);
        let request = LlmRequest::builder(prompt.clone())
            .temperature(temperature)
            .max_tokens(max_tokens.unwrap_or(self.max_tokens))
            .build();

        debug!(model = %self.model, chars = prompt.len(), "Sending generation request");

        let result = self.provider.generate(&self.model, request).await;

        let (response, failed) = match &result {
            Ok(response) => (response.text.clone(), false),
            Err(e) => {
                warn!(model = %self.model, error = %e, "Generation failed");
                (format!("Error calling Gemini API: {}", e), true)
            }
        };

        self.history.push(Interaction {
            prompt,
            response,
            temperature,
            model: self.model.clone(),
            failed,
        });

        result.map(|response| response.text)
    }
}
