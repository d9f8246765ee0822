//! Reader-facing overview of the top summary.

use tracing::debug;

use crate::error::Result;
use crate::pipeline::generate::Generator;
use crate::pipeline::prompts::format_overview_prompt;
use crate::traits::completion::CompletionService;
use crate::types::completion::Stage;
use crate::types::summary::Summary;

pub struct FinalSynthesizer<'a, C: CompletionService + ?Sized> {
    generator: Generator<'a, C>,
}

impl<'a, C: CompletionService + ?Sized> FinalSynthesizer<'a, C> {
    pub fn new(generator: Generator<'a, C>) -> Self {
        Self { generator }
    }

    /// One model call over the reducer's result. The top summary itself is
    /// left untouched; callers keep both.
    pub async fn synthesize_overview(&self, top: &Summary) -> Result<String> {
        let prompt = format_overview_prompt(self.generator.language(), &top.text);
        let overview = self.generator.generate(Stage::Overview, prompt).await?;

        debug!(chars = overview.len(), "Overview synthesized");
        Ok(overview)
    }
}
