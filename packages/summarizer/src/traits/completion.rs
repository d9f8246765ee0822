//! Completion service trait.
//!
//! The summarization pipeline treats text generation as a black box:
//! role-tagged messages in, generated text out. Implementations wrap a
//! concrete backend (an OpenAI-compatible server, a mock, ...).

use async_trait::async_trait;

use crate::error::Result;
use crate::types::completion::{Completion, CompletionRequest};

/// A text-completion backend.
///
/// The pipeline awaits every call before issuing the next one, so an
/// implementation never sees concurrent requests from a single run and
/// does not need to be reentrant.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate a completion for the request.
    ///
    /// A backend that answers without any choice must return
    /// [`Completion::empty`] rather than an error. Transport and server
    /// failures are returned as [`SummarizeError::Completion`].
    ///
    /// [`SummarizeError::Completion`]: crate::error::SummarizeError::Completion
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for &T {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        (**self).complete(request).await
    }
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for std::sync::Arc<T> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        (**self).complete(request).await
    }
}
