//! End-to-end tests for `Summarizer::run` over the mock completion service.

use summarizer::{
    report::{render_detailed, render_final, render_log},
    testing::MockCompletion,
    InputError, ReductionStep, Stage, SummarizeError, Summarizer, SummarizerConfig,
};

/// Seven sentences, each longer than the chunk size used below, so every
/// sentence becomes its own chunk.
fn seven_chunk_document() -> String {
    [
        "Мастер пишет роман о Пилате.",
        "Критики травят Мастера в газетах.",
        "Мастер сжигает рукопись в печи.",
        "Маргарита встречает Воланда на балу.",
        "Воланд возвращает рукопись Мастеру.",
        "Москва горит в последний вечер.",
        "Мастер и Маргарита обретают покой.",
    ]
    .join(" ")
}

fn seven_chunk_config() -> SummarizerConfig {
    SummarizerConfig::default()
        .with_chunk_size(20)
        .with_overlap_sentences(0)
        .with_max_group_size(5)
}

const ENGLISH_DRAFT: &str =
    "The master writes a novel and the critics attack it in the papers for a long time.";

#[tokio::test]
async fn test_run_over_seven_chunks() {
    let ai = MockCompletion::new();
    let summarizer = Summarizer::new(&ai, seven_chunk_config()).unwrap();

    let report = summarizer.run(&seven_chunk_document()).await.unwrap();

    assert_eq!(report.chunk_count(), 7);
    assert_eq!(report.corrected_count(), 0);
    assert!(report
        .leaves
        .iter()
        .enumerate()
        .all(|(i, l)| l.chunk.index == i && l.summary.level == 1));

    // 7 leaves, 2 group collapses, 1 stitch, 1 final collapse, 1 overview
    assert_eq!(ai.call_count(), 12);
    assert_eq!(report.model_calls(), 12);
    assert_eq!(ai.calls_for(Stage::Leaf).len(), 7);
    assert_eq!(ai.calls_for(Stage::Combine).len(), 1);

    assert_eq!(report.top_summary().text, "collapse #11");
    assert_eq!(report.overview, "overview #12");
    let overview_call = ai.calls().pop().unwrap();
    assert!(overview_call.user.contains("collapse #11"));

    match &report.reduction.step {
        ReductionStep::Expand {
            group_sizes,
            stitched,
            ..
        } => {
            assert_eq!(group_sizes, &vec![5, 2]);
            assert_eq!(stitched, "combine #10");
        }
        other => panic!("expected expansion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_leaf_prompts_carry_chunk_text_and_params() {
    let ai = MockCompletion::new();
    let summarizer = Summarizer::new(&ai, seven_chunk_config()).unwrap();

    summarizer.run(&seven_chunk_document()).await.unwrap();

    let leaf_calls = ai.calls_for(Stage::Leaf);
    assert!(leaf_calls[2].user.contains("Fragment: Мастер сжигает рукопись в печи."));
    assert!(leaf_calls.iter().all(|c| c.params.max_tokens == 600));
    assert!(leaf_calls.iter().all(|c| c.system.contains("Russian")));
}

#[tokio::test]
async fn test_nonconformant_leaf_is_corrected_once() {
    let ai = MockCompletion::new()
        .with_response(Stage::Leaf, ENGLISH_DRAFT)
        .with_response(Stage::Correction, "Мастер пишет роман.");
    let summarizer = Summarizer::new(&ai, seven_chunk_config()).unwrap();

    let report = summarizer.run(&seven_chunk_document()).await.unwrap();

    assert_eq!(report.corrected_count(), 1);
    assert!(report.leaves[0].corrected);
    assert_eq!(report.leaves[0].summary.text, "Мастер пишет роман.");
    assert_eq!(ai.calls_for(Stage::Correction).len(), 1);
    assert_eq!(ai.call_count(), 13);
    assert_eq!(report.model_calls(), 13);
}

#[tokio::test]
async fn test_empty_choices_are_not_errors() {
    let ai = MockCompletion::new().with_empty_choices(Stage::Leaf);
    let summarizer = Summarizer::new(&ai, seven_chunk_config()).unwrap();

    let report = summarizer.run(&seven_chunk_document()).await.unwrap();

    assert!(report.leaves.iter().all(|l| l.summary.is_empty()));
    assert_eq!(report.corrected_count(), 0);
}

#[tokio::test]
async fn test_completion_failure_aborts_the_run() {
    // call 9 is the second group collapse
    let ai = MockCompletion::new().failing_at(9);
    let summarizer = Summarizer::new(&ai, seven_chunk_config()).unwrap();

    let err = summarizer.run(&seven_chunk_document()).await.unwrap_err();

    assert!(matches!(err, SummarizeError::Completion(_)));
    assert_eq!(ai.call_count(), 9);
}

#[tokio::test]
async fn test_empty_document() {
    let ai = MockCompletion::new();
    let summarizer = Summarizer::new(&ai, SummarizerConfig::default()).unwrap();

    let err = summarizer.run("").await.unwrap_err();
    assert!(matches!(err, SummarizeError::Input(InputError::Empty)));
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn test_artifacts_cover_every_chunk_and_step() {
    let ai = MockCompletion::new();
    let summarizer = Summarizer::new(&ai, seven_chunk_config()).unwrap();
    let report = summarizer.run(&seven_chunk_document()).await.unwrap();

    let steps = report.reduction.step.step_count();

    let detailed = render_detailed(&report);
    assert_eq!(detailed.matches(" CHUNK ").count(), 7);
    assert_eq!(detailed.matches("[level ").count(), steps);

    let log = render_log(&report);
    assert_eq!(log.matches("Level ").count(), steps);

    let final_text = render_final(&report);
    assert!(final_text.contains("overview #12"));
    assert!(final_text.contains("collapse #11"));
    assert_eq!(final_text.matches("--- Chunk ").count(), 7);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"step\": \"expand\""));
}
