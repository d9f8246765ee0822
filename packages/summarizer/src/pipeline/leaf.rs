//! Leaf summarization: one summary per chunk, with a single corrective
//! retry when the draft drifts out of the target language.

use tracing::{debug, warn};

use crate::error::Result;
use crate::pipeline::generate::Generator;
use crate::pipeline::prompts::{format_correction_prompt, format_leaf_prompt};
use crate::traits::completion::CompletionService;
use crate::types::chunk::Chunk;
use crate::types::completion::Stage;
use crate::types::summary::{Provenance, Summary};

/// Outcome of the correction decision for a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// The draft passed the language check and is kept as is.
    Accepted(Summary),

    /// The draft failed the check and was regenerated once. The regenerated
    /// text is final whether or not it passes.
    Regenerated(Summary),
}

impl Correction {
    pub fn into_summary(self) -> Summary {
        match self {
            Correction::Accepted(summary) | Correction::Regenerated(summary) => summary,
        }
    }

    pub fn summary(&self) -> &Summary {
        match self {
            Correction::Accepted(summary) | Correction::Regenerated(summary) => summary,
        }
    }

    pub fn was_regenerated(&self) -> bool {
        matches!(self, Correction::Regenerated(_))
    }
}

/// Produces leaf summaries.
pub struct LeafSummarizer<'a, C: CompletionService + ?Sized> {
    generator: Generator<'a, C>,
}

impl<'a, C: CompletionService + ?Sized> LeafSummarizer<'a, C> {
    pub fn new(generator: Generator<'a, C>) -> Self {
        Self { generator }
    }

    /// Summarize one chunk, correcting the draft at most once.
    pub async fn summarize_chunk(&self, chunk: &Chunk, level: u32) -> Result<Summary> {
        let draft = self.draft(chunk, level).await?;
        Ok(self.attempt_correction(draft).await?.into_summary())
    }

    /// First-pass summary of a chunk, sanitized but unchecked.
    pub async fn draft(&self, chunk: &Chunk, level: u32) -> Result<Summary> {
        let prompt = format_leaf_prompt(self.generator.language(), level, &chunk.text);
        let text = self.generator.generate(Stage::Leaf, prompt).await?;

        debug!(chunk = chunk.index, chars = text.len(), "Leaf draft");
        Ok(Summary::new(
            text,
            level,
            Provenance::Chunk { index: chunk.index },
        ))
    }

    /// Keep a conformant draft; otherwise regenerate it once with the
    /// correction prompt and its higher temperature.
    pub async fn attempt_correction(&self, draft: Summary) -> Result<Correction> {
        let language = &self.generator.config().language;
        if language.accepts(&draft.text) {
            return Ok(Correction::Accepted(draft));
        }

        warn!(
            provenance = ?draft.provenance,
            target_language = %language.target_language,
            "Summary failed language check, regenerating"
        );

        let prompt = format_correction_prompt(&language.target_language, &draft.text);
        let text = self.generator.generate(Stage::Correction, prompt).await?;

        if !language.accepts(&text) {
            debug!(provenance = ?draft.provenance, "Regenerated summary still fails language check");
        }

        Ok(Correction::Regenerated(draft.with_text(text)))
    }
}
