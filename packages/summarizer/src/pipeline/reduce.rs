//! Hierarchical reduction of an ordered summary sequence to one summary.
//!
//! A sequence of at most `max_group_size` summaries is collapsed by a single
//! model call. A longer one is cut into contiguous groups, each group is
//! reduced one level deeper, the group results are stitched into a
//! narrative, and the group results (not the narrative) are reduced again
//! on the same level. Every expansion divides the sequence length by at
//! least `max_group_size`, so the recursion ends after a logarithmic number
//! of passes.
//!
//! Calls are strictly sequential, group by group in document order.

use futures::future::BoxFuture;
use tracing::info;

use crate::error::Result;
use crate::pipeline::combine::NarrativeCombiner;
use crate::pipeline::generate::Generator;
use crate::pipeline::prompts::format_collapse_prompt;
use crate::traits::completion::CompletionService;
use crate::types::completion::Stage;
use crate::types::config::validate_group_size;
use crate::types::summary::{Provenance, Summary};
use crate::types::trace::{Reduction, ReductionStep};

pub struct HierarchicalReducer<'a, C: CompletionService + ?Sized> {
    generator: Generator<'a, C>,
    max_group_size: usize,
}

impl<'a, C: CompletionService + ?Sized> HierarchicalReducer<'a, C> {
    /// Fails when `max_group_size` is below 2.
    pub fn new(generator: Generator<'a, C>, max_group_size: usize) -> Result<Self> {
        validate_group_size(max_group_size)?;
        Ok(Self {
            generator,
            max_group_size,
        })
    }

    pub fn max_group_size(&self) -> usize {
        self.max_group_size
    }

    /// Reduce `summaries` to a single summary, returning it together with
    /// the trace of every step taken.
    ///
    /// One summary is returned unchanged and nothing reduces to the empty
    /// summary; neither costs a model call.
    pub fn reduce<'s>(
        &'s self,
        summaries: &'s [Summary],
        level: u32,
    ) -> BoxFuture<'s, Result<Reduction>> {
        Box::pin(async move {
            match summaries.len() {
                0 | 1 => Ok(self.passthrough(summaries, level)),
                n if n <= self.max_group_size => self.collapse(summaries, level).await,
                _ => self.expand(summaries, level).await,
            }
        })
    }

    fn passthrough(&self, summaries: &[Summary], level: u32) -> Reduction {
        let summary = summaries
            .first()
            .cloned()
            .unwrap_or_else(|| Summary::empty(level));

        Reduction {
            summary,
            step: ReductionStep::Passthrough {
                level,
                input_count: summaries.len(),
            },
        }
    }

    async fn collapse(&self, summaries: &[Summary], level: u32) -> Result<Reduction> {
        info!(level, inputs = summaries.len(), "Collapsing summaries");

        let texts: Vec<&str> = summaries.iter().map(Summary::as_str).collect();
        let prompt = format_collapse_prompt(self.generator.language(), level, &texts);
        let text = self.generator.generate(Stage::Collapse, prompt).await?;

        let summary = Summary::new(
            text,
            level,
            Provenance::merge(summaries.iter().map(|s| &s.provenance)),
        );

        Ok(Reduction {
            step: ReductionStep::Collapse {
                level,
                input_count: summaries.len(),
                summary: summary.clone(),
            },
            summary,
        })
    }

    async fn expand(&self, summaries: &[Summary], level: u32) -> Result<Reduction> {
        let group_sizes: Vec<usize> = summaries
            .chunks(self.max_group_size)
            .map(<[Summary]>::len)
            .collect();

        info!(
            level,
            inputs = summaries.len(),
            groups = group_sizes.len(),
            group_sizes = ?group_sizes,
            "Expanding summaries into groups"
        );

        let mut groups = Vec::with_capacity(group_sizes.len());
        let mut group_summaries = Vec::with_capacity(group_sizes.len());
        for group in summaries.chunks(self.max_group_size) {
            let reduction = self.reduce(group, level + 1).await?;
            group_summaries.push(reduction.summary);
            groups.push(reduction.step);
        }

        // The stitched narrative is recorded but the next step reduces the
        // group summaries themselves.
        let stitched = NarrativeCombiner::new(self.generator)
            .combine(&group_summaries)
            .await?;

        let next = self.reduce(&group_summaries, level).await?;

        Ok(Reduction {
            summary: next.summary,
            step: ReductionStep::Expand {
                level,
                group_sizes,
                groups,
                group_summaries,
                stitched,
                next: Box::new(next.step),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;
    use crate::types::config::SummarizerConfig;

    fn leaves(n: usize) -> Vec<Summary> {
        (0..n)
            .map(|i| Summary::leaf(format!("Сводка {}.", i), i))
            .collect()
    }

    #[tokio::test]
    async fn test_single_summary_is_returned_unchanged() {
        let ai = MockCompletion::new();
        let config = SummarizerConfig::default();
        let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

        let input = leaves(1);
        let reduction = reducer.reduce(&input, 1).await.unwrap();

        assert_eq!(reduction.summary, input[0]);
        assert_eq!(reduction.step.model_calls(), 0);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_sequence_reduces_to_empty_text() {
        let ai = MockCompletion::new();
        let config = SummarizerConfig::default();
        let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

        let reduction = reducer.reduce(&[], 1).await.unwrap();

        assert_eq!(reduction.summary.text, "");
        assert_eq!(reduction.summary.provenance, Provenance::Empty);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_direct_collapse() {
        let ai = MockCompletion::new().with_response(Stage::Collapse, "Общая сводка.");
        let config = SummarizerConfig::default();
        let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

        let input = leaves(3);
        let reduction = reducer.reduce(&input, 2).await.unwrap();

        assert_eq!(reduction.summary.text, "Общая сводка.");
        assert_eq!(reduction.summary.level, 2);
        assert_eq!(
            reduction.summary.provenance,
            Provenance::Chunks { first: 0, last: 2 }
        );

        let calls = ai.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0]
            .user
            .contains("Сводка 0.\n\nСводка 1.\n\nСводка 2."));
        assert!(calls[0].user.contains("Level of detail: 2."));
    }

    #[tokio::test]
    async fn test_expansion_groups_are_contiguous_and_one_level_deeper() {
        let ai = MockCompletion::new();
        let config = SummarizerConfig::default();
        let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 3).unwrap();

        let input = leaves(8);
        let reduction = reducer.reduce(&input, 1).await.unwrap();

        match &reduction.step {
            ReductionStep::Expand {
                group_sizes,
                groups,
                group_summaries,
                ..
            } => {
                assert_eq!(group_sizes, &vec![3, 3, 2]);
                assert_eq!(groups.len(), 3);
                assert!(groups.iter().all(|g| g.level() == 2));
                assert_eq!(
                    group_summaries[1].provenance,
                    Provenance::Chunks { first: 3, last: 5 }
                );
            }
            other => panic!("expected expansion, got {:?}", other),
        }
        assert_eq!(
            reduction.summary.provenance,
            Provenance::Chunks { first: 0, last: 7 }
        );
    }

    #[tokio::test]
    async fn test_singleton_group_passes_through() {
        let ai = MockCompletion::new();
        let config = SummarizerConfig::default();
        let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

        let input = leaves(6);
        let reduction = reducer.reduce(&input, 1).await.unwrap();

        // [5, 1]: one collapse, a free passthrough, one stitch, one collapse
        assert_eq!(ai.call_count(), 3);
        assert_eq!(reduction.step.model_calls(), 3);
    }

    #[test]
    fn test_rejects_group_size_below_two() {
        let ai = MockCompletion::new();
        let config = SummarizerConfig::default();
        assert!(HierarchicalReducer::new(Generator::new(&ai, &config), 1).is_err());
        assert!(HierarchicalReducer::new(Generator::new(&ai, &config), 0).is_err());
    }
}
