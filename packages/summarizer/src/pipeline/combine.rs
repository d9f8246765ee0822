//! Narrative stitching of several summaries into one continuous text.

use tracing::debug;

use crate::error::Result;
use crate::pipeline::generate::Generator;
use crate::pipeline::prompts::format_combine_prompt;
use crate::traits::completion::CompletionService;
use crate::types::completion::Stage;
use crate::types::summary::Summary;

pub struct NarrativeCombiner<'a, C: CompletionService + ?Sized> {
    generator: Generator<'a, C>,
}

impl<'a, C: CompletionService + ?Sized> NarrativeCombiner<'a, C> {
    pub fn new(generator: Generator<'a, C>) -> Self {
        Self { generator }
    }

    /// Fuse `summaries`, in order, into one narrative.
    ///
    /// Nothing to combine yields the empty string without a model call.
    pub async fn combine(&self, summaries: &[Summary]) -> Result<String> {
        if summaries.is_empty() {
            return Ok(String::new());
        }

        let texts: Vec<&str> = summaries.iter().map(Summary::as_str).collect();
        let prompt = format_combine_prompt(self.generator.language(), &texts);
        let text = self.generator.generate(Stage::Combine, prompt).await?;

        debug!(inputs = summaries.len(), chars = text.len(), "Narrative combined");
        Ok(text)
    }
}
