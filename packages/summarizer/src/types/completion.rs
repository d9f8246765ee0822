//! Request and response types exchanged with a completion service.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One role-tagged message of a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Generation halts at the first of these strings
    #[serde(default)]
    pub stop: Vec<String>,
}

impl GenerationParams {
    /// Create parameters without stop sequences.
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
            stop: Vec::new(),
        }
    }

    /// Set the stop sequences.
    pub fn with_stop(mut self, stop: &[&str]) -> Self {
        self.stop = stop.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Which step of the pipeline issued a request.
///
/// Never sent to the backend; used for logging and by test doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// First-pass summary of one chunk
    Leaf,
    /// Stricter rewrite after a conformance failure
    Correction,
    /// Reduction of a small group into one summary
    Collapse,
    /// Narrative stitching of group summaries
    Combine,
    /// Reader-facing synthesis of the top summary
    Overview,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Leaf => "leaf",
            Stage::Correction => "correction",
            Stage::Collapse => "collapse",
            Stage::Combine => "combine",
            Stage::Overview => "overview",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completion request: ordered messages plus sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub stage: Stage,
    pub messages: Vec<ChatMessage>,
    pub params: GenerationParams,
}

impl CompletionRequest {
    /// Build the usual system + user pair.
    pub fn new(
        stage: Stage,
        system: impl Into<String>,
        user: impl Into<String>,
        params: GenerationParams,
    ) -> Self {
        Self {
            stage,
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            params,
        }
    }

    /// Content of the first message with the given role.
    pub fn content_of(&self, role: Role) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }
}

/// Token accounting reported by the backend, when available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Generated text plus completion metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text; empty when the backend produced no choices
    pub text: String,

    /// Why generation ended, as reported by the backend
    pub finish_reason: Option<String>,

    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// A completion carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// The result of a response without choices.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
