//! Integration tests for the hierarchical reducer.
//!
//! These pin the reduction shape:
//! 1. One summary passes through, nothing reduces to the empty summary
//! 2. Small sequences collapse with one call
//! 3. Large sequences expand into contiguous groups one level deeper
//! 4. The stitched narrative is recorded but never returned

use proptest::prelude::*;
use summarizer::{
    testing::MockCompletion, Generator, HierarchicalReducer, Provenance, ReductionStep, Stage,
    Summary, SummarizerConfig,
};

/// Leaf summaries for `n` consecutive chunks.
fn leaves(n: usize) -> Vec<Summary> {
    (0..n)
        .map(|i| Summary::leaf(format!("Сводка фрагмента {}.", i), i))
        .collect()
}

/// Smallest `k` with `m^k >= n`.
fn ceil_log(n: usize, m: usize) -> usize {
    let mut k = 0;
    let mut reach = 1;
    while reach < n {
        reach *= m;
        k += 1;
    }
    k
}

#[tokio::test]
async fn test_seven_summaries_with_group_size_five() {
    let ai = MockCompletion::new();
    let config = SummarizerConfig::default();
    let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

    let input = leaves(7);
    let reduction = reducer.reduce(&input, 1).await.unwrap();

    // two group collapses, one stitch, one final collapse
    let calls = ai.calls();
    let stages: Vec<Stage> = calls.iter().map(|c| c.stage).collect();
    assert_eq!(
        stages,
        vec![Stage::Collapse, Stage::Collapse, Stage::Combine, Stage::Collapse]
    );
    assert_eq!(reduction.step.model_calls(), 4);

    // groups are contiguous slices reduced one level deeper
    assert!(calls[0].user.contains("Сводка фрагмента 0."));
    assert!(calls[0].user.contains("Сводка фрагмента 4."));
    assert!(!calls[0].user.contains("Сводка фрагмента 5."));
    assert!(calls[0].user.contains("Level of detail: 2."));
    assert!(calls[1].user.contains("Сводка фрагмента 5.\n\nСводка фрагмента 6."));

    match &reduction.step {
        ReductionStep::Expand {
            level,
            group_sizes,
            groups,
            next,
            ..
        } => {
            assert_eq!(*level, 1);
            assert_eq!(group_sizes, &vec![5, 2]);
            assert_eq!(groups.len(), 2);
            assert!(groups.iter().all(|g| g.level() == 2));
            assert!(matches!(
                next.as_ref(),
                ReductionStep::Collapse {
                    level: 1,
                    input_count: 2,
                    ..
                }
            ));
        }
        other => panic!("expected expansion, got {:?}", other),
    }

    assert_eq!(reduction.summary.text, "collapse #4");
    assert_eq!(reduction.summary.level, 1);
    assert_eq!(
        reduction.summary.provenance,
        Provenance::Chunks { first: 0, last: 6 }
    );
}

#[tokio::test]
async fn test_stitched_narrative_is_a_side_artifact() {
    let ai = MockCompletion::new().with_response(Stage::Combine, "Сшитое повествование.");
    let config = SummarizerConfig::default();
    let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

    let input = leaves(7);
    let reduction = reducer.reduce(&input, 1).await.unwrap();

    let ReductionStep::Expand {
        stitched,
        group_summaries,
        ..
    } = &reduction.step
    else {
        panic!("expected expansion");
    };

    // kept in the trace
    assert_eq!(stitched, "Сшитое повествование.");
    assert_eq!(group_summaries.len(), 2);

    // never returned, never fed forward
    assert_ne!(reduction.summary.text, *stitched);
    let final_collapse = ai.calls().pop().unwrap();
    assert_eq!(final_collapse.stage, Stage::Collapse);
    assert!(final_collapse.user.contains("collapse #1\n\ncollapse #2"));
    assert!(!final_collapse.user.contains("Сшитое повествование."));
}

#[tokio::test]
async fn test_single_summary_is_verbatim() {
    let ai = MockCompletion::new();
    let config = SummarizerConfig::default();
    let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

    let input = vec![Summary::leaf("<think>не трогать</think>   как есть", 9)];
    let reduction = reducer.reduce(&input, 3).await.unwrap();

    assert_eq!(reduction.summary, input[0]);
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn test_empty_reduces_to_empty_string() {
    let ai = MockCompletion::new();
    let config = SummarizerConfig::default();
    let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

    let reduction = reducer.reduce(&[], 1).await.unwrap();
    assert_eq!(reduction.summary.text, "");
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn test_failure_at_any_level_aborts() {
    // fail the second group's collapse
    let ai = MockCompletion::new().failing_at(2);
    let config = SummarizerConfig::default();
    let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

    let input = leaves(7);
    let result = reducer.reduce(&input, 1).await;

    assert!(matches!(result, Err(summarizer::SummarizeError::Completion(_))));
    assert_eq!(ai.call_count(), 2);
}

#[tokio::test]
async fn test_empty_choices_degrade_to_empty_summaries() {
    let ai = MockCompletion::new().with_empty_choices(Stage::Collapse);
    let config = SummarizerConfig::default();
    let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), 5).unwrap();

    let input = leaves(7);
    let reduction = reducer.reduce(&input, 1).await.unwrap();

    assert!(reduction.summary.is_empty());
    assert_eq!(ai.call_count(), 4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reduction_converges(n in 1usize..300, m in 2usize..8) {
        let ai = MockCompletion::new();
        let config = SummarizerConfig::default();
        let reducer = HierarchicalReducer::new(Generator::new(&ai, &config), m).unwrap();
        let input = leaves(n);

        let reduction = futures::executor::block_on(reducer.reduce(&input, 1)).unwrap();
        let step = &reduction.step;

        prop_assert!(step.passes() <= ceil_log(n, m));
        prop_assert_eq!(step.model_calls(), ai.call_count());
        prop_assert_eq!(step.input_count(), n);

        if n > m {
            let ReductionStep::Expand { groups, group_sizes, .. } = step else {
                panic!("expected expansion for {} > {}", n, m);
            };
            prop_assert_eq!(groups.len(), (n + m - 1) / m);
            prop_assert!(groups.iter().all(|g| g.level() == 2));
            prop_assert!(group_sizes.iter().all(|&s| s <= m));
        }

        let expected = if n == 1 {
            Provenance::Chunk { index: 0 }
        } else {
            Provenance::Chunks { first: 0, last: n - 1 }
        };
        prop_assert_eq!(reduction.summary.provenance, expected);
    }
}
