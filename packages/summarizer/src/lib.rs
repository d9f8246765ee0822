//! Hierarchical Narrative Summarization Library
//!
//! Turns an arbitrarily long document into a short, coherent narrative by
//! repeatedly calling a text-completion model.
//!
//! # Pipeline
//!
//! 1. The document is split into sentences and grouped into overlapping
//!    chunks.
//! 2. Every chunk gets a leaf summary. A summary that drifts out of the
//!    target language is regenerated once.
//! 3. The leaf summaries are reduced group by group until one summary is
//!    left. Between levels the group results are stitched into a
//!    narrative, which is kept in the trace.
//! 4. The top summary is turned into a reader-facing overview.
//!
//! Every model response is sanitized: meta-reasoning blocks and chatty
//! openers are stripped before the text goes anywhere else.
//!
//! # Usage
//!
//! ```rust,ignore
//! use summarizer::{Summarizer, SummarizerConfig};
//! use summarizer::ai::OpenAICompletion;
//!
//! let ai = OpenAICompletion::local("http://localhost:8080/v1", "local-model");
//! let summarizer = Summarizer::new(ai, SummarizerConfig::default())?;
//!
//! let report = summarizer.run(&text).await?;
//! println!("{}", report.overview);
//! println!("{}", summarizer::report::render_log(&report));
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The completion service abstraction
//! - [`types`] - Chunks, summaries, configuration, traces and reports
//! - [`text`] - Pure text transforms (splitting, chunking, sanitizing)
//! - [`pipeline`] - Leaf summarizer, reducer, combiner, synthesizer, engine
//! - [`report`] - Plain-text artifacts rendered from a report
//! - [`testing`] - Mock completion service for tests

pub mod document;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod testing;
pub mod text;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use document::{Document, SourceEncoding};
pub use error::{InputError, Result, SummarizeError};
pub use pipeline::{
    Correction, FinalSynthesizer, Generator, HierarchicalReducer, LeafSummarizer,
    NarrativeCombiner, Summarizer,
};
pub use traits::completion::CompletionService;
pub use types::{
    chunk::Chunk,
    completion::{
        ChatMessage, Completion, CompletionRequest, GenerationParams, Role, Stage, TokenUsage,
    },
    config::{LanguageProfile, StageParams, SummarizerConfig},
    report::SummaryReport,
    summary::{Provenance, Summary},
    trace::{LeafRecord, Reduction, ReductionStep},
};
