//! Single prompt-to-text step shared by every stage.

use std::time::Instant;

use tracing::debug;

use crate::error::Result;
use crate::pipeline::prompts::format_system_prompt;
use crate::text::sanitize;
use crate::traits::completion::CompletionService;
use crate::types::completion::{CompletionRequest, Stage};
use crate::types::config::SummarizerConfig;

/// Completion service plus the settings every request is built from.
pub struct Generator<'a, C: CompletionService + ?Sized> {
    ai: &'a C,
    config: &'a SummarizerConfig,
}

impl<C: CompletionService + ?Sized> Clone for Generator<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CompletionService + ?Sized> Copy for Generator<'_, C> {}

impl<'a, C: CompletionService + ?Sized> Generator<'a, C> {
    pub fn new(ai: &'a C, config: &'a SummarizerConfig) -> Self {
        Self { ai, config }
    }

    pub fn config(&self) -> &'a SummarizerConfig {
        self.config
    }

    pub fn language(&self) -> &'a str {
        &self.config.language.target_language
    }

    /// Send `user` with the shared system prompt and this stage's
    /// parameters, then sanitize the response.
    ///
    /// A response without choices yields the empty string.
    pub async fn generate(&self, stage: Stage, user: String) -> Result<String> {
        let request = CompletionRequest::new(
            stage,
            format_system_prompt(self.language()),
            user,
            self.config.params.for_stage(stage).clone(),
        );

        let started = Instant::now();
        let completion = self.ai.complete(request).await?;
        let text = sanitize(&completion.text);

        debug!(
            stage = %stage,
            elapsed_ms = started.elapsed().as_millis() as u64,
            raw_chars = completion.text.len(),
            chars = text.len(),
            finish_reason = ?completion.finish_reason,
            "Completion received"
        );

        Ok(text)
    }
}
