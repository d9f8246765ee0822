//! Summarization pipeline.
//!
//! The pipeline runs:
//! - Leaf summarization (one call per chunk, one corrective retry)
//! - Hierarchical reduction (grouped collapse plus narrative stitching)
//! - Final synthesis of a reader-facing overview

pub mod combine;
pub mod engine;
pub mod generate;
pub mod leaf;
pub mod prompts;
pub mod reduce;
pub mod synthesize;

pub use combine::NarrativeCombiner;
pub use engine::Summarizer;
pub use generate::Generator;
pub use leaf::{Correction, LeafSummarizer};
pub use prompts::{
    format_collapse_prompt, format_combine_prompt, format_correction_prompt, format_leaf_prompt,
    format_overview_prompt, format_system_prompt, prompt_fingerprint, COLLAPSE_PROMPT,
    COMBINE_PROMPT, CORRECTION_PROMPT, LEAF_PROMPT, OVERVIEW_PROMPT, SYSTEM_PROMPT,
};
pub use reduce::HierarchicalReducer;
pub use synthesize::FinalSynthesizer;
