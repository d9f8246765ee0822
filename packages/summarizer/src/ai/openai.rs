//! Completion service over an OpenAI-compatible chat endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use summarizer::ai::OpenAICompletion;
//!
//! let ai = OpenAICompletion::local("http://localhost:8080/v1", "local-model");
//! let summarizer = Summarizer::new(ai, SummarizerConfig::default())?;
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, ChatResponse, Message, OpenAIClient};

use crate::error::{Result, SummarizeError};
use crate::traits::completion::CompletionService;
use crate::types::completion::{Completion, CompletionRequest, Role, TokenUsage};

/// Chat-completion backend.
#[derive(Clone)]
pub struct OpenAICompletion {
    client: OpenAIClient,
    model: String,
}

impl OpenAICompletion {
    /// Wrap an existing client.
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Local inference server that needs no API key.
    pub fn local(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(OpenAIClient::local(base_url), model)
    }

    /// Create from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let client =
            OpenAIClient::from_env().map_err(|e| SummarizeError::Config(e.to_string()))?;
        Ok(Self::new(client, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &OpenAIClient {
        &self.client
    }

    fn chat_request(&self, request: CompletionRequest) -> ChatRequest {
        let params = request.params;
        let chat = request.messages.into_iter().fold(
            ChatRequest::new(&self.model),
            |chat, message| {
                chat.message(match message.role {
                    Role::System => Message::system(message.content),
                    Role::User => Message::user(message.content),
                    Role::Assistant => Message::assistant(message.content),
                })
            },
        );

        chat.temperature(params.temperature)
            .max_tokens(params.max_tokens)
            .stop(params.stop)
    }
}

/// A response without choices has no content and becomes the empty
/// completion.
fn into_completion(response: ChatResponse) -> Completion {
    Completion {
        text: response.content.unwrap_or_default(),
        finish_reason: response.finish_reason,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        }),
    }
}

#[async_trait]
impl CompletionService for OpenAICompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let chat = self.chat_request(request);
        let response = self
            .client
            .chat_completion(chat)
            .await
            .map_err(SummarizeError::completion)?;

        Ok(into_completion(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::completion::{GenerationParams, Stage};

    #[test]
    fn test_chat_request_mapping() {
        let ai = OpenAICompletion::local("http://localhost:8080/v1", "local-model");
        let request = CompletionRequest::new(
            Stage::Leaf,
            "system text",
            "user text",
            GenerationParams::new(600, 0.1).with_stop(&["</s>", "Human:"]),
        );

        let chat = ai.chat_request(request);

        assert_eq!(chat.model, "local-model");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].content, "user text");
        assert_eq!(chat.temperature, Some(0.1));
        assert_eq!(chat.max_tokens, Some(600));
        assert_eq!(chat.stop, vec!["</s>".to_string(), "Human:".to_string()]);
    }

    #[test]
    fn test_missing_content_is_empty_completion() {
        let completion = into_completion(ChatResponse {
            content: None,
            finish_reason: None,
            usage: None,
        });
        assert!(completion.is_empty());
    }
}
