//! Plain-text renderings of a [`SummaryReport`].
//!
//! Three artifacts are produced from one report:
//! - the detailed trace: every chunk, every leaf summary and every
//!   reduction step with its level and group sizes,
//! - the final output: overview, top summary and all leaf summaries,
//! - the recursion log: group counts, sizes and short previews per level.
//!
//! Banners are free-form; each chunk and each reduction step appears
//! exactly once in the trace and in the log.

use crate::types::report::SummaryReport;
use crate::types::summary::Provenance;
use crate::types::trace::ReductionStep;

/// Longest preview of a summary in the recursion log, in characters.
pub const PREVIEW_CHARS: usize = 200;

const RULE: &str = "==========";

/// Every chunk, leaf summary and reduction step.
pub fn render_detailed(report: &SummaryReport) -> String {
    let mut out = header("DETAILED SUMMARY TRACE", report);

    let total = report.leaves.len();
    for leaf in &report.leaves {
        let chunk = &leaf.chunk;
        out.push_str(&format!(
            "{RULE} CHUNK {} of {} (sentences {}-{}, overlap {}) {RULE}\n{}\n\n",
            chunk.index + 1,
            total,
            chunk.sentences.start + 1,
            chunk.sentences.end,
            chunk.overlap,
            chunk.text,
        ));

        let marker = if leaf.corrected { " [language corrected]" } else { "" };
        out.push_str(&format!(
            "---- Leaf summary {} (level {}){} ----\n{}\n\n",
            chunk.index + 1,
            leaf.summary.level,
            marker,
            leaf.summary.text,
        ));
    }

    out.push_str(&format!("{RULE} REDUCTION {RULE}\n"));
    write_detailed_step(&mut out, &report.reduction.step, 0);

    out.push_str(&format!(
        "\n{RULE} TOP SUMMARY (level {}, {}) {RULE}\n{}\n",
        report.reduction.summary.level,
        describe_provenance(&report.reduction.summary.provenance),
        report.reduction.summary.text,
    ));
    out
}

/// Overview, top summary and every leaf summary.
pub fn render_final(report: &SummaryReport) -> String {
    let mut out = header("FINAL SUMMARY", report);

    out.push_str(&format!("{RULE} OVERVIEW {RULE}\n{}\n\n", report.overview));
    out.push_str(&format!(
        "{RULE} HIERARCHICAL SUMMARY (level {}) {RULE}\n{}\n\n",
        report.reduction.summary.level, report.reduction.summary.text,
    ));

    out.push_str(&format!("{RULE} LEAF SUMMARIES {RULE}\n"));
    for leaf in &report.leaves {
        out.push_str(&format!(
            "--- Chunk {} ---\n{}\n\n",
            leaf.chunk.index + 1,
            leaf.summary.text,
        ));
    }
    out
}

/// Recursion structure with short previews.
pub fn render_log(report: &SummaryReport) -> String {
    let mut out = header("HIERARCHICAL SUMMARIZATION LOG", report);

    out.push_str(&format!(
        "Chunks: {}, corrected leaf summaries: {}\n\n",
        report.chunk_count(),
        report.corrected_count(),
    ));
    write_log_step(&mut out, &report.reduction.step, 0);

    let step = &report.reduction.step;
    out.push_str(&format!(
        "\nExpansion passes: {}, depth: {}, reduction calls: {}, total model calls: {}\n",
        step.passes(),
        step.depth(),
        step.model_calls(),
        report.model_calls(),
    ));
    out
}

/// First `max_chars` characters of `text` on one line, with an ellipsis
/// when anything was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &flat[..end]),
        None => flat,
    }
}

fn header(title: &str, report: &SummaryReport) -> String {
    format!(
        "{RULE} {title} {RULE}\nRun: {}\nGenerated: {}\nPrompt fingerprint: {}\n\
         Chunk size: {}, overlap: {} sentences, max group size: {}\n\n",
        report.run_id,
        report.generated_at.to_rfc3339(),
        report.prompt_fingerprint,
        report.config.chunk_size,
        report.config.overlap_sentences,
        report.config.max_group_size,
    )
}

fn describe_provenance(provenance: &Provenance) -> String {
    match provenance {
        Provenance::Empty => "no chunks".to_string(),
        Provenance::Chunk { index } => format!("chunk {}", index + 1),
        Provenance::Chunks { first, last } => format!("chunks {}-{}", first + 1, last + 1),
    }
}

fn write_detailed_step(out: &mut String, step: &ReductionStep, depth: usize) {
    let indent = "  ".repeat(depth);
    match step {
        ReductionStep::Passthrough { level, input_count } => {
            out.push_str(&format!(
                "{indent}[level {level}] passthrough of {input_count} summary, no model call\n"
            ));
        }
        ReductionStep::Collapse {
            level,
            input_count,
            summary,
        } => {
            out.push_str(&format!(
                "{indent}[level {level}] collapse of {input_count} summaries ({})\n",
                describe_provenance(&summary.provenance),
            ));
            for line in summary.text.lines() {
                out.push_str(&format!("{indent}    {line}\n"));
            }
        }
        ReductionStep::Expand {
            level,
            group_sizes,
            groups,
            group_summaries,
            stitched,
            next,
        } => {
            out.push_str(&format!(
                "{indent}[level {level}] expansion of {} summaries into {} groups, sizes {:?}\n",
                step.input_count(),
                group_sizes.len(),
                group_sizes,
            ));
            for group in groups {
                write_detailed_step(out, group, depth + 1);
            }

            out.push_str(&format!(
                "{indent}  group summaries at level {level}: {}\n",
                group_summaries.len()
            ));
            out.push_str(&format!("{indent}  stitched narrative:\n"));
            for line in stitched.lines() {
                out.push_str(&format!("{indent}    {line}\n"));
            }

            write_detailed_step(out, next, depth + 1);
        }
    }
}

fn write_log_step(out: &mut String, step: &ReductionStep, depth: usize) {
    let indent = "  ".repeat(depth);
    match step {
        ReductionStep::Passthrough { level, input_count } => {
            out.push_str(&format!(
                "{indent}Level {level}: {input_count} summary, returned unchanged\n"
            ));
        }
        ReductionStep::Collapse {
            level,
            input_count,
            summary,
        } => {
            out.push_str(&format!(
                "{indent}Level {level}: collapsed {input_count} summaries -> \"{}\"\n",
                preview(&summary.text, PREVIEW_CHARS),
            ));
        }
        ReductionStep::Expand {
            level,
            group_sizes,
            groups,
            stitched,
            next,
            ..
        } => {
            out.push_str(&format!(
                "{indent}Level {level}: {} summaries in {} groups, sizes {:?}\n",
                step.input_count(),
                group_sizes.len(),
                group_sizes,
            ));
            for group in groups {
                write_log_step(out, group, depth + 1);
            }
            out.push_str(&format!(
                "{indent}  stitched: \"{}\"\n",
                preview(stitched, PREVIEW_CHARS)
            ));
            write_log_step(out, next, depth + 1);
        }
    }
}
