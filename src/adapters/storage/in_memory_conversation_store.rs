//! In-Memory Conversation Store Adapter
//!
//! Keeps conversations and messages in process memory.
//! Useful for testing and local development without PostgreSQL.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::{Sender, StoredMessage};
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, SortOrder, StoreError};

#[derive(Debug, Clone)]
struct MessageRow {
    conversation_id: ConversationId,
    seq: u64,
    message: StoredMessage,
}

#[derive(Debug, Default)]
struct Tables {
    conversations: HashSet<ConversationId>,
    messages: Vec<MessageRow>,
    next_seq: u64,
}

/// In-memory conversation store.
///
/// Messages against unknown conversation ids are accepted, like a schema
/// without a foreign key would. Call [`set_unavailable`](Self::set_unavailable)
/// to make every operation fail with `StoreError::Connection`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryConversationStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored conversations.
    pub async fn conversation_count(&self) -> usize {
        self.tables.read().await.conversations.len()
    }

    /// Number of stored messages across all conversations.
    pub async fn message_count(&self) -> usize {
        self.tables.read().await.messages.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create_conversation(&self) -> Result<ConversationId, StoreError> {
        self.check_available()?;
        let id = ConversationId::new();
        self.tables.write().await.conversations.insert(id);
        Ok(id)
    }

    async fn insert_message(
        &self,
        conversation_id: &ConversationId,
        sender: Sender,
        text: &str,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.messages.push(MessageRow {
            conversation_id: *conversation_id,
            seq,
            message: StoredMessage::new(sender.as_str(), text),
        });
        Ok(())
    }

    async fn select_messages(
        &self,
        conversation_id: &ConversationId,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;

        let mut rows: Vec<&MessageRow> = tables
            .messages
            .iter()
            .filter(|row| row.conversation_id == *conversation_id)
            .collect();
        rows.sort_by_key(|row| (row.message.timestamp, row.seq));
        if order == SortOrder::Descending {
            rows.reverse();
        }

        let limit = limit.map_or(usize::MAX, |l| l as usize);
        Ok(rows
            .into_iter()
            .take(limit)
            .map(|row| row.message.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(count: usize) -> (InMemoryConversationStore, ConversationId) {
        let store = InMemoryConversationStore::new();
        let id = store.create_conversation().await.unwrap();
        for i in 0..count {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Ai };
            store
                .insert_message(&id, sender, &format!("m{}", i))
                .await
                .unwrap();
        }
        (store, id)
    }

    fn texts(messages: &[StoredMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[tokio::test]
    async fn creates_distinct_conversations() {
        let store = InMemoryConversationStore::new();
        let a = store.create_conversation().await.unwrap();
        let b = store.create_conversation().await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.conversation_count().await, 2);
    }

    #[tokio::test]
    async fn ascending_returns_insertion_order() {
        let (store, id) = seeded(3).await;

        let messages = store
            .select_messages(&id, SortOrder::Ascending, None)
            .await
            .unwrap();

        assert_eq!(texts(&messages), vec!["m0", "m1", "m2"]);
        assert_eq!(messages[0].sender, "user");
        assert_eq!(messages[1].sender, "ai");
    }

    #[tokio::test]
    async fn descending_with_limit_returns_newest() {
        let (store, id) = seeded(5).await;

        let messages = store
            .select_messages(&id, SortOrder::Descending, Some(2))
            .await
            .unwrap();

        assert_eq!(texts(&messages), vec!["m4", "m3"]);
    }

    #[tokio::test]
    async fn messages_are_scoped_to_conversation() {
        let (store, id) = seeded(2).await;
        let other = store.create_conversation().await.unwrap();
        store.insert_message(&other, Sender::User, "elsewhere").await.unwrap();

        let messages = store
            .select_messages(&id, SortOrder::Ascending, None)
            .await
            .unwrap();

        assert_eq!(texts(&messages), vec!["m0", "m1"]);
    }

    #[tokio::test]
    async fn unknown_conversation_reads_empty() {
        let store = InMemoryConversationStore::new();

        let messages = store
            .select_messages(&ConversationId::new(), SortOrder::Ascending, None)
            .await
            .unwrap();

        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn accepts_messages_for_unknown_conversation() {
        let store = InMemoryConversationStore::new();
        let orphan = ConversationId::new();

        store.insert_message(&orphan, Sender::User, "hello?").await.unwrap();

        assert_eq!(store.conversation_count().await, 0);
        assert_eq!(store.message_count().await, 1);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let (store, id) = seeded(1).await;
        store.set_unavailable(true);

        assert!(matches!(
            store.create_conversation().await,
            Err(StoreError::Connection(_))
        ));
        assert!(store.insert_message(&id, Sender::User, "x").await.is_err());
        assert!(store
            .select_messages(&id, SortOrder::Ascending, None)
            .await
            .is_err());

        store.set_unavailable(false);
        assert_eq!(store.message_count().await, 1);
    }
}
