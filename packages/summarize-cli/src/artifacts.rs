//! Writes the text artifacts of a run to the output directory.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use summarizer::report::{render_detailed, render_final, render_log};
use summarizer::SummaryReport;

pub const DETAILED_FILE: &str = "Summary_Detailed.txt";
pub const FINAL_FILE: &str = "Output_summary.txt";
pub const LOG_FILE: &str = "hierarchical_log.txt";
pub const TRACE_FILE: &str = "trace.json";

/// Paths of the files written for one run.
#[derive(Debug)]
pub struct Artifacts {
    pub detailed: PathBuf,
    pub final_summary: PathBuf,
    pub log: PathBuf,
    pub trace: Option<PathBuf>,
}

impl Artifacts {
    fn text_files(&self) -> [&Path; 3] {
        [
            self.detailed.as_path(),
            self.final_summary.as_path(),
            self.log.as_path(),
        ]
    }
}

/// Render `report` into `dir`, creating it if needed. The JSON trace is
/// only written when `json` is set.
pub fn write_artifacts(dir: &Path, report: &SummaryReport, json: bool) -> Result<Artifacts> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let artifacts = Artifacts {
        detailed: dir.join(DETAILED_FILE),
        final_summary: dir.join(FINAL_FILE),
        log: dir.join(LOG_FILE),
        trace: json.then(|| dir.join(TRACE_FILE)),
    };

    write_file(&artifacts.detailed, &render_detailed(report))?;
    write_file(&artifacts.final_summary, &render_final(report))?;
    write_file(&artifacts.log, &render_log(report))?;
    if let Some(path) = &artifacts.trace {
        let trace = report.to_json().context("Failed to serialize report")?;
        write_file(path, &trace)?;
    }

    Ok(artifacts)
}

/// Append the total run time to every text artifact.
pub fn append_elapsed(artifacts: &Artifacts, elapsed: Duration) -> Result<()> {
    let line = format!("\nElapsed: {:.2} s\n", elapsed.as_secs_f64());
    for path in artifacts.text_files() {
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Artifact written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarizer::{testing::MockCompletion, Summarizer, SummarizerConfig};

    async fn report() -> SummaryReport {
        let config = SummarizerConfig::default()
            .with_chunk_size(20)
            .with_overlap_sentences(0)
            .with_max_group_size(2);
        let summarizer = Summarizer::new(MockCompletion::new(), config).unwrap();
        summarizer
            .run("Первое длинное предложение. Второе длинное предложение. Третье длинное предложение.")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_writes_text_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let report = report().await;

        let artifacts = write_artifacts(&out, &report, false).unwrap();

        assert!(artifacts.trace.is_none());
        assert!(!out.join(TRACE_FILE).exists());

        let final_text = fs::read_to_string(out.join(FINAL_FILE)).unwrap();
        assert!(final_text.contains(&report.overview));

        let detailed = fs::read_to_string(out.join(DETAILED_FILE)).unwrap();
        assert_eq!(detailed.matches(" CHUNK ").count(), 3);

        let log = fs::read_to_string(out.join(LOG_FILE)).unwrap();
        assert!(log.contains("sizes [2, 1]"));
    }

    #[tokio::test]
    async fn test_json_trace_and_elapsed() {
        let dir = tempfile::tempdir().unwrap();
        let report = report().await;

        let artifacts = write_artifacts(dir.path(), &report, true).unwrap();
        append_elapsed(&artifacts, Duration::from_millis(1500)).unwrap();

        let trace = fs::read_to_string(dir.path().join(TRACE_FILE)).unwrap();
        assert!(trace.contains(&report.run_id.to_string()));

        for name in [DETAILED_FILE, FINAL_FILE, LOG_FILE] {
            let text = fs::read_to_string(dir.path().join(name)).unwrap();
            assert!(text.ends_with("Elapsed: 1.50 s\n"), "{name}");
        }
    }
}
