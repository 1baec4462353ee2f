//! Content generation
//!
//! A [`ContentGenerator`] turns a [`GenerationRequest`] into text. The
//! production implementation talks to an OpenAI-compatible chat completions
//! endpoint; [`mock::MockGenerator`] scripts responses for tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::GenerationError;
use crate::prompts::PromptTemplate;
use crate::types::{GenerationRequest, GenerationResult};

pub mod mock;
pub mod openai;

pub use openai::OpenAiGenerator;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Issue one completion request.
    ///
    /// Returns the raw text of the first choice; callers go through
    /// [`generate`] which trims it and rejects empty output.
    async fn complete(&self, request: &GenerationRequest) -> GenerationResult;

    /// Model used when the template's model is not overridden
    fn model_override(&self) -> Option<&str> {
        None
    }
}

/// Render `template` for `date` and ask `generator` for text.
///
/// Failures are logged here; the caller only decides whether to abort.
pub async fn generate(
    generator: &dyn ContentGenerator,
    template: &PromptTemplate,
    date: NaiveDate,
) -> GenerationResult {
    let request = template.to_request(date, generator.model_override());

    tracing::info!(
        prompt = template.name,
        model = %request.model_name,
        max_tokens = request.max_output_tokens,
        temperature = request.temperature,
        "Requesting generated content"
    );

    let text = generator
        .complete(&request)
        .await
        .and_then(|raw| usable_text(&raw));

    match &text {
        Ok(content) => tracing::debug!("Generated {} characters", content.chars().count()),
        Err(e) => tracing::error!(prompt = template.name, "Error generating content: {}", e),
    }

    text
}

fn usable_text(raw: &str) -> GenerationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(trimmed.to_string())
}
