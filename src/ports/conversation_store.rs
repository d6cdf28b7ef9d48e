//! Conversation Store Port - durable, ordered log of support conversations.
//!
//! Two record kinds live behind this port: conversations (identity only) and
//! messages (conversation reference, sender, text, insertion timestamp).
//! Messages are append-only; nothing here updates or deletes them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::{Sender, StoredMessage};
use crate::domain::foundation::ConversationId;

/// Sort direction for message reads, by insertion timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Port for conversation persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Creates an empty conversation and returns its generated id.
    async fn create_conversation(&self) -> Result<ConversationId, StoreError>;

    /// Appends a message to a conversation.
    ///
    /// The conversation id is not checked for existence by callers; whether
    /// an unknown id is accepted is up to the backing store.
    async fn insert_message(
        &self,
        conversation_id: &ConversationId,
        sender: Sender,
        text: &str,
    ) -> Result<(), StoreError>;

    /// Reads messages of a conversation ordered by timestamp.
    ///
    /// `limit` caps the number of rows after ordering; `None` returns all.
    /// An unknown conversation yields an empty vector.
    async fn select_messages(
        &self,
        conversation_id: &ConversationId,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<Vec<StoredMessage>, StoreError>;
}

/// Conversation store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not obtain or keep a connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// A query failed (constraint violation, bad input, ...).
    #[error("database error: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_maps_to_sql() {
        assert_eq!(SortOrder::Ascending.as_sql(), "ASC");
        assert_eq!(SortOrder::Descending.as_sql(), "DESC");
    }

    #[test]
    fn store_error_displays_correctly() {
        assert_eq!(
            StoreError::Connection("refused".into()).to_string(),
            "connection error: refused"
        );
        assert_eq!(
            StoreError::Database("fk violation".into()).to_string(),
            "database error: fk violation"
        );
    }
}
