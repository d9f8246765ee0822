//! Error types for the chat completion client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Chat completion client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Configuration error (missing API key, invalid base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, server went away mid-response)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the completion endpoint
    #[error("API error: {0}")]
    Api(String),

    /// Response body was not a chat completion
    #[error("Parse error: {0}")]
    Parse(String),
}
