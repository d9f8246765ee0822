//! End-to-end pipeline: document in, report out.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{InputError, Result};
use crate::pipeline::generate::Generator;
use crate::pipeline::leaf::LeafSummarizer;
use crate::pipeline::prompts::prompt_fingerprint;
use crate::pipeline::reduce::HierarchicalReducer;
use crate::pipeline::synthesize::FinalSynthesizer;
use crate::text::{chunk_text, normalize_document};
use crate::traits::completion::CompletionService;
use crate::types::chunk::Chunk;
use crate::types::config::SummarizerConfig;
use crate::types::report::SummaryReport;
use crate::types::trace::LeafRecord;

/// Level assigned to leaf summaries and to the top of the reduction.
const LEAF_LEVEL: u32 = 1;

/// Summarization engine over a completion backend.
///
/// # Example
///
/// ```rust,ignore
/// let summarizer = Summarizer::new(ai, SummarizerConfig::default())?;
/// let report = summarizer.run(&text).await?;
/// println!("{}", report.overview);
/// ```
pub struct Summarizer<C: CompletionService> {
    ai: C,
    config: SummarizerConfig,
}

impl<C: CompletionService> Summarizer<C> {
    /// Create an engine; the configuration is validated up front.
    pub fn new(ai: C, config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { ai, config })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn ai(&self) -> &C {
        &self.ai
    }

    fn generator(&self) -> Generator<'_, C> {
        Generator::new(&self.ai, &self.config)
    }

    /// Split a document into chunks the way [`run`](Self::run) does.
    pub fn chunks(&self, document: &str) -> Vec<Chunk> {
        chunk_text(
            &self.prepare(document),
            self.config.chunk_size,
            self.config.overlap_sentences,
        )
    }

    fn prepare(&self, document: &str) -> String {
        if self.config.normalize_input {
            normalize_document(document)
        } else {
            document.to_string()
        }
    }

    /// Summarize a document.
    ///
    /// An empty document is rejected before any model call. Any completion
    /// failure aborts the run.
    pub async fn run(&self, document: &str) -> Result<SummaryReport> {
        let text = self.prepare(document);
        if text.trim().is_empty() {
            return Err(InputError::Empty.into());
        }

        let chunks = chunk_text(
            &text,
            self.config.chunk_size,
            self.config.overlap_sentences,
        );
        info!(
            chars = text.chars().count(),
            chunks = chunks.len(),
            chunk_size = self.config.chunk_size,
            "Document chunked"
        );

        let leaves = self.summarize_chunks(chunks).await?;

        let reducer = HierarchicalReducer::new(self.generator(), self.config.max_group_size)?;
        let summaries: Vec<_> = leaves.iter().map(|l| l.summary.clone()).collect();
        let reduction = reducer.reduce(&summaries, LEAF_LEVEL).await?;
        info!(
            passes = reduction.step.passes(),
            depth = reduction.step.depth(),
            model_calls = reduction.step.model_calls(),
            "Reduction complete"
        );

        let overview = FinalSynthesizer::new(self.generator())
            .synthesize_overview(&reduction.summary)
            .await?;

        let report = SummaryReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            prompt_fingerprint: prompt_fingerprint(),
            config: self.config.clone(),
            document_chars: text.chars().count(),
            leaves,
            reduction,
            overview,
        };
        info!(
            run_id = %report.run_id,
            chunks = report.chunk_count(),
            corrected = report.corrected_count(),
            model_calls = report.model_calls(),
            "Summary complete"
        );

        Ok(report)
    }

    /// Leaf summaries for every chunk, in document order.
    async fn summarize_chunks(&self, chunks: Vec<Chunk>) -> Result<Vec<LeafRecord>> {
        let leaf = LeafSummarizer::new(self.generator());
        let total = chunks.len();
        let mut records = Vec::with_capacity(total);

        for chunk in chunks {
            debug!(chunk = chunk.index + 1, total, chars = chunk.char_len(), "Summarizing chunk");

            let draft = leaf.draft(&chunk, LEAF_LEVEL).await?;
            let correction = leaf.attempt_correction(draft).await?;

            records.push(LeafRecord {
                corrected: correction.was_regenerated(),
                summary: correction.into_summary(),
                chunk,
            });
        }

        Ok(records)
    }
}
