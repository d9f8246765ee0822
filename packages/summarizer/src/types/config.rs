//! Configuration types for the summarization pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SummarizeError};
use crate::types::completion::{GenerationParams, Stage};

/// Tokens that betray output in the wrong language.
///
/// Defaults target a Russian-language deployment: a handful of the most
/// common English function words.
pub const DEFAULT_FORBIDDEN_TOKENS: &[&str] = &[
    "the", "and", "of", "to", "a", "in", "that", "it", "with", "as", "for",
];

/// More distinct forbidden tokens than this fails conformance.
pub const DEFAULT_CONFORMANCE_THRESHOLD: usize = 2;

/// Output language requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Language every response must be written in, as named in prompts
    pub target_language: String,

    /// Short, common words of the language to keep out
    pub forbidden_tokens: Vec<String>,

    /// Forbidden-token count above which a response is rejected
    pub threshold: usize,
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self {
            target_language: "Russian".to_string(),
            forbidden_tokens: DEFAULT_FORBIDDEN_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            threshold: DEFAULT_CONFORMANCE_THRESHOLD,
        }
    }
}

impl LanguageProfile {
    /// Profile for the given target language with the default forbidden set.
    pub fn new(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            ..Default::default()
        }
    }

    /// Replace the forbidden tokens.
    pub fn with_forbidden_tokens(
        mut self,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.forbidden_tokens = tokens.into_iter().map(|t| t.into()).collect();
        self
    }
}

/// Sampling parameters for every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageParams {
    pub leaf: GenerationParams,
    pub correction: GenerationParams,
    pub collapse: GenerationParams,
    pub combine: GenerationParams,
    pub overview: GenerationParams,
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            leaf: GenerationParams::new(600, 0.1).with_stop(&[
                "</s>",
                "Human:",
                "<think>",
                "<reasoning>",
                "<scratchpad>",
                "Ok",
                "So,",
                "First,",
            ]),
            correction: GenerationParams::new(600, 0.3).with_stop(&["</s>", "Human:", "<think>"]),
            collapse: GenerationParams::new(800, 0.1).with_stop(&[
                "</s>",
                "Human:",
                "<think>",
                "<reasoning>",
            ]),
            combine: GenerationParams::new(8000, 0.1).with_stop(&[
                "</s>",
                "Human:",
                "<think>",
                "<reasoning>",
                "<scratchpad>",
            ]),
            overview: GenerationParams::new(1600, 0.1).with_stop(&[
                "</s>",
                "Human:",
                "<think>",
                "<reasoning>",
                "Ok,",
                "So,",
                "First,",
            ]),
        }
    }
}

impl StageParams {
    /// Parameters for a stage.
    pub fn for_stage(&self, stage: Stage) -> &GenerationParams {
        match stage {
            Stage::Leaf => &self.leaf,
            Stage::Correction => &self.correction,
            Stage::Collapse => &self.collapse,
            Stage::Combine => &self.combine,
            Stage::Overview => &self.overview,
        }
    }
}

/// Configuration for the summarization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Target chunk length in characters.
    ///
    /// A chunk is closed as soon as it reaches this length; a single
    /// longer sentence still forms its own chunk. Default: 3000.
    pub chunk_size: usize,

    /// Sentences repeated at the start of the next chunk. Default: 3.
    pub overlap_sentences: usize,

    /// Largest number of summaries reduced by one model call.
    ///
    /// Must be at least 2. Default: 5.
    pub max_group_size: usize,

    /// Collapse whitespace and strip decorative characters before
    /// chunking. Default: true.
    pub normalize_input: bool,

    #[serde(default)]
    pub language: LanguageProfile,

    #[serde(default)]
    pub params: StageParams,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 3000,
            overlap_sentences: 3,
            max_group_size: 5,
            normalize_input: true,
            language: LanguageProfile::default(),
            params: StageParams::default(),
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target chunk size in characters.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the sentence overlap between chunks.
    pub fn with_overlap_sentences(mut self, overlap: usize) -> Self {
        self.overlap_sentences = overlap;
        self
    }

    /// Set the reduction group size.
    pub fn with_max_group_size(mut self, max_group_size: usize) -> Self {
        self.max_group_size = max_group_size;
        self
    }

    /// Enable or disable input normalization.
    pub fn with_normalize_input(mut self, normalize: bool) -> Self {
        self.normalize_input = normalize;
        self
    }

    /// Set the output language profile.
    pub fn with_language(mut self, language: LanguageProfile) -> Self {
        self.language = language;
        self
    }

    /// Set per-stage generation parameters.
    pub fn with_params(mut self, params: StageParams) -> Self {
        self.params = params;
        self
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SummarizeError::Config(
                "chunk_size must be greater than zero".into(),
            ));
        }
        validate_group_size(self.max_group_size)?;
        if self.language.target_language.trim().is_empty() {
            return Err(SummarizeError::Config(
                "target_language must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// A group size below 2 never shrinks the summary sequence.
pub(crate) fn validate_group_size(max_group_size: usize) -> Result<()> {
    if max_group_size < 2 {
        return Err(SummarizeError::Config(format!(
            "max_group_size must be at least 2, got {}",
            max_group_size
        )));
    }
    Ok(())
}
