//! Request and response bodies for the chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::SendMessageResult;
use crate::domain::chat::StoredMessage;

/// Body of `POST /chat/message`.
///
/// Both fields are optional at the wire level; a missing `message` is
/// reported the same way as an empty one. `sessionId` is kept as raw JSON so
/// a value of the wrong type cannot make the whole body unreadable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub reply: String,
    pub session_id: String,
}

impl From<SendMessageResult> for SendMessageResponse {
    fn from(result: SendMessageResult) -> Self {
        Self {
            reply: result.reply,
            session_id: result.session_id.to_string(),
        }
    }
}

/// One entry of `GET /chat/history/:session_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub text: String,
}

impl From<StoredMessage> for HistoryEntry {
    fn from(message: StoredMessage) -> Self {
        Self {
            sender: message.sender,
            text: message.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error body. Every failure response carries a single `error` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
