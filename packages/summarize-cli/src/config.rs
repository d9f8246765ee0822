use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Backend and output settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key-value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("SUMMARIZER_BASE_URL")
            .unwrap_or_else(|| "http://localhost:8080/v1".to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("SUMMARIZER_BASE_URL must be an http(s) URL, got {base_url}");
        }

        Ok(Self {
            base_url,
            api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            model: lookup("SUMMARIZER_MODEL").unwrap_or_else(|| "local-model".to_string()),
            output_dir: lookup("SUMMARIZER_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
