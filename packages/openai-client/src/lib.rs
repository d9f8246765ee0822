//! Minimal client for OpenAI-compatible chat completion endpoints
//!
//! Talks to any server that implements `POST {base_url}/chat/completions`:
//! the OpenAI API itself, or local inference servers (llama.cpp `server`,
//! vLLM, Ollama's OpenAI shim). No domain-specific logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::local("http://localhost:8080/v1");
//!
//! let response = client.chat_completion(
//!     ChatRequest::new("local-model")
//!         .message(Message::system("Answer briefly."))
//!         .message(Message::user("Hello!"))
//!         .temperature(0.1)
//!         .max_tokens(600)
//!         .stop(["</s>", "Human:"]),
//! ).await?;
//!
//! println!("{}", response.content.unwrap_or_default());
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// OpenAI-compatible API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create a client for a local server that needs no API key.
    pub fn local(base_url: impl Into<String>) -> Self {
        Self::new("").with_base_url(base_url)
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for local servers, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get the first choice
    /// back. A response with no choices is not an error; its `content`
    /// is `None`.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json");
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = builder.json(&request).send().await.map_err(|e| {
            warn!(error = %e, "Chat completion request failed");
            OpenAIError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                error = %truncate_to_char_boundary(&error_text, 500),
                "Chat completion API error"
            );
            return Err(OpenAIError::Api(format!(
                "chat completion failed with {}: {}",
                status, error_text
            )));
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let chat_response = ChatResponse::from(raw);

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            finish_reason = chat_response.finish_reason.as_deref().unwrap_or("none"),
            "Chat completion"
        );

        Ok(chat_response)
    }
}
