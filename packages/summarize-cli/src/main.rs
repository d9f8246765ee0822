//! Summarize a long document with a local or hosted chat model.
//!
//! Reads the document, runs the hierarchical summarizer against an
//! OpenAI-compatible endpoint and writes the detailed trace, the final
//! summary and the recursion log to the output directory.

mod artifacts;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openai_client::OpenAIClient;
use summarizer::ai::OpenAICompletion;
use summarizer::{Document, LanguageProfile, Summarizer, SummarizerConfig};

use crate::artifacts::{append_elapsed, write_artifacts};
use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "summarize")]
#[command(about = "Hierarchical narrative summary of a long document")]
struct Cli {
    /// Document to summarize (UTF-8 or Windows-1251)
    input: PathBuf,

    /// Directory for the output files [env: SUMMARIZER_OUTPUT_DIR]
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Chat completion endpoint [env: SUMMARIZER_BASE_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Model name sent with every request [env: SUMMARIZER_MODEL]
    #[arg(long)]
    model: Option<String>,

    /// Target chunk length in characters
    #[arg(long, default_value_t = 3000)]
    chunk_size: usize,

    /// Sentences repeated at the start of the next chunk
    #[arg(long, default_value_t = 3)]
    overlap: usize,

    /// Largest number of summaries reduced by one call
    #[arg(long, default_value_t = 5)]
    max_group_size: usize,

    /// Language every summary is written in
    #[arg(long, default_value = "Russian")]
    language: String,

    /// Comma-separated words that mark a reply as off-language. Defaults to
    /// common English function words, which suits non-English targets only
    #[arg(long, value_delimiter = ',')]
    forbidden_tokens: Option<Vec<String>>,

    /// Keep the document text as is instead of normalizing it
    #[arg(long)]
    no_normalize: bool,

    /// Also write the full trace as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn summarizer_config(&self) -> SummarizerConfig {
        let mut language = LanguageProfile::new(&self.language);
        if let Some(tokens) = &self.forbidden_tokens {
            language = language.with_forbidden_tokens(
                tokens.iter().map(|t| t.trim()).filter(|t| !t.is_empty()),
            );
        }

        SummarizerConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_overlap_sentences(self.overlap)
            .with_max_group_size(self.max_group_size)
            .with_normalize_input(!self.no_normalize)
            .with_language(language)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,summarizer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let started = Instant::now();

    let document = Document::load(&cli.input)
        .with_context(|| format!("Failed to load document {}", cli.input.display()))?;
    tracing::info!(
        path = %cli.input.display(),
        chars = document.char_len(),
        encoding = ?document.encoding,
        "Document loaded"
    );

    let base_url = cli.base_url.clone().unwrap_or(config.base_url);
    let model = cli.model.clone().unwrap_or(config.model);
    let client = match config.api_key {
        Some(key) => OpenAIClient::new(key).with_base_url(&base_url),
        None => OpenAIClient::local(&base_url),
    };
    tracing::info!(base_url = %base_url, model = %model, "Using completion endpoint");

    let summarizer = Summarizer::new(OpenAICompletion::new(client, model), cli.summarizer_config())
        .context("Invalid summarizer configuration")?;

    let report = summarizer
        .run(document.text())
        .await
        .context("Summarization failed")?;

    let output_dir = cli.output_dir.clone().unwrap_or(config.output_dir);
    let artifacts = write_artifacts(&output_dir, &report, cli.json)?;
    let elapsed = started.elapsed();
    append_elapsed(&artifacts, elapsed)?;

    println!("{}", "Summary complete".green().bold());
    println!(
        "  {} chunks, {} corrected, {} model calls, {:.1} s",
        report.chunk_count(),
        report.corrected_count(),
        report.model_calls(),
        elapsed.as_secs_f64()
    );
    println!("  {} {}", "detailed:".dimmed(), artifacts.detailed.display());
    println!("  {} {}", "summary: ".dimmed(), artifacts.final_summary.display());
    println!("  {} {}", "log:     ".dimmed(), artifacts.log.display());
    if let Some(trace) = &artifacts.trace {
        println!("  {} {}", "trace:   ".dimmed(), trace.display());
    }
    println!();
    println!("{}", report.overview);

    Ok(())
}
