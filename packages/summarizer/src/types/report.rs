//! End-to-end result of summarizing one document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::config::SummarizerConfig;
use crate::types::summary::Summary;
use crate::types::trace::{LeafRecord, Reduction};

/// Everything a run produced, in the order it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub run_id: Uuid,

    pub generated_at: DateTime<Utc>,

    /// Hash of the prompt templates used for this run.
    ///
    /// Two reports with different fingerprints were produced by
    /// different prompts and are not directly comparable.
    pub prompt_fingerprint: String,

    pub config: SummarizerConfig,

    /// Characters of text that went into chunking
    pub document_chars: usize,

    /// Chunks and their leaf summaries, in document order
    pub leaves: Vec<LeafRecord>,

    /// Hierarchical reduction of the leaf summaries
    pub reduction: Reduction,

    /// Reader-facing synthesis of the top summary
    pub overview: String,
}

impl SummaryReport {
    /// The single summary the reducer converged to.
    pub fn top_summary(&self) -> &Summary {
        &self.reduction.summary
    }

    pub fn chunk_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf summaries that needed a language correction.
    pub fn corrected_count(&self) -> usize {
        self.leaves.iter().filter(|l| l.corrected).count()
    }

    /// Completion calls made during the run, overview included.
    pub fn model_calls(&self) -> usize {
        self.leaves.len() + self.corrected_count() + self.reduction.step.model_calls() + 1
    }

    /// Pretty JSON for archiving.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
