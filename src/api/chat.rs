//! Chat completion provider types

use serde::{Deserialize, Serialize};

/// One role-tagged message in a conversation transcript
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: String) -> Self {
        Self {
            role: "system".to_string(),
            content,
        }
    }

    pub fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

/// Inbound chat request from the browser.
///
/// Carries either a standalone `message` or a full `messages` history. The
/// history arrives as raw JSON so malformed entries can be dropped one by one
/// instead of failing the whole request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Option<serde_json::Value>,
}

impl ChatPayload {
    /// The standalone message, when present and non-empty
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// The history entries, when `messages` is an array
    pub fn history(&self) -> Option<&Vec<serde_json::Value>> {
        self.messages.as_ref().and_then(|m| m.as_array())
    }

    /// True when the payload carries something to chat about. A `messages`
    /// value that is not an array does not count.
    pub fn has_input(&self) -> bool {
        self.message_text().is_some() || self.history().is_some()
    }
}

/// Outbound completion request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatTurn>,
}

/// Completion response; only the fields the relay reads are typed strictly
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Response choice
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response message
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl ChatCompletionResponse {
    /// Content of the first completion choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}

/// Body returned to the browser from `/chat`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatReply {
    pub reply: String,
}
