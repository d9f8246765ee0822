//! Trace of a hierarchical reduction.
//!
//! The reducer returns this tree next to its result instead of writing log
//! files as it recurses; callers decide how to persist it.

use serde::{Deserialize, Serialize};

use crate::types::chunk::Chunk;
use crate::types::summary::Summary;

/// One call of the reducer and everything it caused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ReductionStep {
    /// Zero or one summary: returned as is, no model call.
    Passthrough { level: u32, input_count: usize },

    /// A small sequence reduced by a single model call.
    Collapse {
        level: u32,
        input_count: usize,
        summary: Summary,
    },

    /// A large sequence split into groups, each reduced one level deeper,
    /// followed by narrative stitching and a reduction of the group results
    /// on the same level.
    Expand {
        level: u32,
        group_sizes: Vec<usize>,
        groups: Vec<ReductionStep>,
        group_summaries: Vec<Summary>,
        /// Stitched narrative over `group_summaries`. Kept for the record;
        /// it does not feed the next step.
        stitched: String,
        next: Box<ReductionStep>,
    },
}

impl ReductionStep {
    pub fn level(&self) -> u32 {
        match self {
            ReductionStep::Passthrough { level, .. }
            | ReductionStep::Collapse { level, .. }
            | ReductionStep::Expand { level, .. } => *level,
        }
    }

    /// Number of summaries this step received.
    pub fn input_count(&self) -> usize {
        match self {
            ReductionStep::Passthrough { input_count, .. }
            | ReductionStep::Collapse { input_count, .. } => *input_count,
            ReductionStep::Expand { group_sizes, .. } => group_sizes.iter().sum(),
        }
    }

    /// Completion calls issued by this step and its descendants.
    pub fn model_calls(&self) -> usize {
        match self {
            ReductionStep::Passthrough { .. } => 0,
            ReductionStep::Collapse { .. } => 1,
            ReductionStep::Expand { groups, next, .. } => {
                groups.iter().map(ReductionStep::model_calls).sum::<usize>()
                    + 1
                    + next.model_calls()
            }
        }
    }

    /// Number of expansion passes along the `next` chain of this step.
    pub fn passes(&self) -> usize {
        match self {
            ReductionStep::Expand { next, .. } => 1 + next.passes(),
            _ => 0,
        }
    }

    /// Longest chain of nested steps, counting this one.
    pub fn depth(&self) -> usize {
        match self {
            ReductionStep::Expand { groups, next, .. } => {
                let deepest_group = groups.iter().map(ReductionStep::depth).max().unwrap_or(0);
                1 + deepest_group.max(next.depth())
            }
            _ => 1,
        }
    }

    /// Total number of steps in the tree, this one included.
    pub fn step_count(&self) -> usize {
        match self {
            ReductionStep::Expand { groups, next, .. } => {
                1 + groups.iter().map(ReductionStep::step_count).sum::<usize>()
                    + next.step_count()
            }
            _ => 1,
        }
    }
}

/// Result of reducing a summary sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reduction {
    pub summary: Summary,
    pub step: ReductionStep,
}

/// A chunk together with its leaf summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub chunk: Chunk,
    pub summary: Summary,
    /// The first draft failed the language check and was regenerated
    pub corrected: bool,
}
