//! Chat message value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Maximum number of characters kept from an inbound user message.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Who authored a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The customer.
    User,
    /// The support assistant.
    Ai,
}

impl Sender {
    /// Returns the value persisted in the `sender` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated text of an inbound user message.
///
/// Leading and trailing whitespace is trimmed, blank input is rejected and
/// anything past [`MAX_MESSAGE_CHARS`] characters is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// Validates and normalizes raw client input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the input is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }

        let text = match trimmed.char_indices().nth(MAX_MESSAGE_CHARS) {
            Some((cut, _)) => &trimmed[..cut],
            None => trimmed,
        };

        Ok(Self(text.to_string()))
    }

    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the normalized text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for MessageText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A message as read back from the conversation store.
///
/// `sender` is kept as the raw stored value rather than a [`Sender`], so rows
/// written by other tools still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub sender: String,
    pub text: String,
    pub timestamp: Timestamp,
}

impl StoredMessage {
    /// Creates a stored message stamped with the current time.
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// True when the message was written by the customer.
    ///
    /// Every other sender value counts as the assistant.
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User.as_str()
    }
}
