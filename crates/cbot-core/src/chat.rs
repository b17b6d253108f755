//! Wire contract of the conversational assistant.

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// Reply used when the webhook answers with a non-success status.
pub const UNREACHABLE: &str = "The assistant is currently unreachable. Please try again later.";

/// Reply used when the webhook cannot be reached at all.
pub const CONNECTION_FAILED: &str =
    "An error occurred while connecting to the chatbot service. Please try again later.";

/// Reply used when the webhook answers without a `response` field.
pub const NO_REPLY: &str = "Your message was received, but no reply could be generated.";

/// Reply shown by a client that could not reach the service.
pub const CLIENT_CONNECTION_ERROR: &str = "A connection error occurred. Please try again later.";

/// A chat message as posted by a client or forwarded to the webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    #[serde(default)]
    pub message: String,
}

/// The assistant's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The reply text. The webhook may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ChatResponse {
    /// A response carrying the given reply.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            response: Some(reply.into()),
        }
    }

    /// The reply, or [`NO_REPLY`] when the webhook gave none.
    #[must_use]
    pub fn reply_or_default(self) -> String {
        self.response.unwrap_or_else(|| NO_REPLY.to_string())
    }
}

/// The message is blank.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("message must not be blank")]
pub struct BlankMessage;

/// A validated, trimmed chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage(NonEmptyString);

impl ChatMessage {
    /// Trims the text and rejects it if nothing remains.
    ///
    /// # Errors
    ///
    /// Returns [`BlankMessage`] for empty or whitespace-only text.
    pub fn new(text: &str) -> Result<Self, BlankMessage> {
        NonEmptyString::new(text.trim().to_string())
            .map(Self)
            .map_err(|_| BlankMessage)
    }

    /// The message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<ChatRequest> for ChatMessage {
    type Error = BlankMessage;

    fn try_from(request: ChatRequest) -> Result<Self, Self::Error> {
        Self::new(&request.message)
    }
}

impl From<&ChatMessage> for ChatRequest {
    fn from(message: &ChatMessage) -> Self {
        Self {
            message: message.as_str().to_string(),
        }
    }
}
