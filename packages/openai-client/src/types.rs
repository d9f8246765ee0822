//! Chat completion request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat Completion
// =============================================================================

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "gpt-4o-mini", or whatever name a local server exposes)
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sequences at which generation stops
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            stop: Vec::new(),
        }
    }
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the stop sequences, replacing any already present.
    pub fn stop(mut self, stop: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stop = stop.into_iter().map(Into::into).collect();
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
///
/// `content` is `None` when the server answered without any choice, which
/// local inference servers do when generation hits a stop sequence at once.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Content of the first choice, if any
    pub content: Option<String>,

    /// Why generation ended ("stop", "length", ...)
    pub finish_reason: Option<String>,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Raw chat response from API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessageResponse,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

impl From<ChatResponseRaw> for ChatResponse {
    fn from(raw: ChatResponseRaw) -> Self {
        let (content, finish_reason) = match raw.choices.into_iter().next() {
            Some(choice) => (choice.message.content, choice.finish_reason),
            None => (None, None),
        };

        Self {
            content,
            finish_reason,
            usage: raw.usage,
        }
    }
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,

    /// Total tokens used
    pub total_tokens: u32,
}

// =============================================================================
// Utilities
// =============================================================================

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let sys = Message::system("You are helpful");
        assert_eq!(sys.role, "system");

        let user = Message::user("Hello");
        assert_eq!(user.role, "user");

        let assistant = Message::assistant("Hi there");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_chat_request_builder() {
        let req = ChatRequest::new("local-model")
            .message(Message::user("Hello"))
            .temperature(0.3)
            .max_tokens(600)
            .stop(["</s>", "Human:"]);

        assert_eq!(req.model, "local-model");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.temperature, Some(0.3));
        assert_eq!(req.max_tokens, Some(600));
        assert_eq!(req.stop, vec!["</s>".to_string(), "Human:".to_string()]);
    }

    #[test]
    fn test_empty_stop_is_not_serialized() {
        let req = ChatRequest::new("m").message(Message::user("hi"));
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("stop").is_none());
        assert!(json.get("temperature").is_none());

        let json = serde_json::to_value(req.stop(["<think>"])).unwrap();
        assert_eq!(json["stop"][0], "<think>");
    }

    #[test]
    fn test_response_without_choices() {
        let raw: ChatResponseRaw = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let response = ChatResponse::from(raw);
        assert!(response.content.is_none());
        assert!(response.finish_reason.is_none());

        let raw: ChatResponseRaw = serde_json::from_str(r#"{}"#).unwrap();
        assert!(ChatResponse::from(raw).content.is_none());
    }

    #[test]
    fn test_response_with_null_content() {
        let raw: ChatResponseRaw = serde_json::from_str(
            r#"{"choices": [{"message": {"content": null}, "finish_reason": "stop"}]}"#,
        )
        .unwrap();
        let response = ChatResponse::from(raw);
        assert!(response.content.is_none());
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_response_first_choice_wins() {
        let raw: ChatResponseRaw = serde_json::from_str(
            r#"{
                "choices": [
                    {"message": {"role": "assistant", "content": "first"}, "finish_reason": "length"},
                    {"message": {"role": "assistant", "content": "second"}}
                ],
                "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
            }"#,
        )
        .unwrap();
        let response = ChatResponse::from(raw);
        assert_eq!(response.content.as_deref(), Some("first"));
        assert_eq!(response.finish_reason.as_deref(), Some("length"));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(4));
    }

    #[test]
    fn test_truncate_to_char_boundary() {
        let text = "Привет мир";
        let truncated = truncate_to_char_boundary(text, 7);
        assert!(truncated.len() <= 7);
        assert!(text.starts_with(truncated));
    }
}
