//! Typed errors for the summarization library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! a bad input document apart from a failing completion backend.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while summarizing a document.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Source document missing, unreadable or empty
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Completion service failed or was unreachable
    #[error("completion service error: {0}")]
    Completion(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration rejected before any model call
    #[error("config error: {0}")]
    Config(String),

    /// Report could not be serialized
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Problems with the source document. All of them are fatal and are
/// reported before the first completion request.
#[derive(Debug, Error)]
pub enum InputError {
    /// The document path does not exist
    #[error("document not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The document exists but could not be read
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document has no text left to summarize
    #[error("document is empty")]
    Empty,
}

impl SummarizeError {
    /// Wrap any backend error as a completion failure.
    pub fn completion(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Completion(err.into())
    }
}

/// Result type alias for summarization operations.
pub type Result<T> = std::result::Result<T, SummarizeError>;
