//! Answer synthesis from stored facts.
//!
//! The language model is only ever shown the user's own triples and must
//! answer from them alone.

use async_trait::async_trait;
use groq::{Groq, Message, Request};
use thiserror::Error;
use tracing::{debug, warn};

/// The answer when the facts do not support one.
pub const UNKNOWN_ANSWER: &str = "I don't know.";

/// Default model for answer synthesis.
pub const DEFAULT_ANSWER_MODEL: &str = "llama-3.3-70b-versatile";

/// Errors from answer synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("API error: {0}")]
    Api(#[from] groq::Error),
}

/// Produces a natural-language answer grounded in the given triples.
///
/// `triples` are lines of the form `user RELATION entity`. When none of
/// them supports an answer the result must be exactly [`UNKNOWN_ANSWER`].
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    async fn synthesize(&self, triples: &[String], question: &str)
        -> Result<String, SynthesisError>;
}

/// Build the fixed answering policy around the given triples.
pub fn policy_prompt(triples: &[String]) -> String {
    let context = triples.join("\n");
    format!(
        r#"You are a memory assistant.

You must answer ONLY using the provided context.

Context:
{context}

Rules:
- Always answer in a complete natural sentence.
- Speak in second person (use "You").
- Do NOT output raw entity values alone.
- If the answer is not in the context, say exactly: {UNKNOWN_ANSWER}
- Do not guess.
- Do not use outside knowledge."#
    )
}

/// Answer synthesis backed by a Groq-hosted model.
pub struct GroqSynthesizer {
    client: Groq,
    model: String,
    temperature: f32,
    max_tokens: usize,
}

impl GroqSynthesizer {
    /// Create a synthesizer with the given API client.
    pub fn new(client: Groq) -> Self {
        Self {
            client,
            model: DEFAULT_ANSWER_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 256,
        }
    }

    /// Create from environment (GROQ_API_KEY).
    pub fn from_env() -> Result<Self, groq::Error> {
        Ok(Self::new(Groq::from_env()?))
    }

    /// Set a custom model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the answer length limit.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The model answers are requested from.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, triples: &[String], question: &str) -> Request {
        Request::new(vec![
            Message::system(policy_prompt(triples)),
            Message::user(question),
        ])
        .with_model(&self.model)
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens)
    }
}

#[async_trait]
impl AnswerSynthesizer for GroqSynthesizer {
    async fn synthesize(
        &self,
        triples: &[String],
        question: &str,
    ) -> Result<String, SynthesisError> {
        debug!(model = %self.model, triples = triples.len(), "synthesizing answer");

        let response = self
            .client
            .complete(self.build_request(triples, question))
            .await
            .map_err(|e| {
                warn!(error = %e, "answer synthesis failed");
                e
            })?;

        let answer = response.text();
        if answer.is_empty() {
            return Ok(UNKNOWN_ANSWER.to_string());
        }
        Ok(answer.to_string())
    }
}
