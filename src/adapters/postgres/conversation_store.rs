//! PostgreSQL implementation of ConversationStore.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE conversations (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid()
//! );
//!
//! CREATE TABLE messages (
//!     id SERIAL PRIMARY KEY,
//!     conversation_id UUID REFERENCES conversations(id),
//!     sender TEXT NOT NULL,
//!     text TEXT NOT NULL,
//!     timestamp TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! Ids and timestamps are assigned by the database.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::chat::{Sender, StoredMessage};
use crate::domain::foundation::{ConversationId, Timestamp};
use crate::ports::{ConversationStore, SortOrder, StoreError};

/// PostgreSQL implementation of ConversationStore.
#[derive(Clone)]
pub struct PostgresConversationStore {
    pool: PgPool,
}

impl PostgresConversationStore {
    /// Creates a new PostgresConversationStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PostgresConversationStore {
    async fn create_conversation(&self) -> Result<ConversationId, StoreError> {
        let row = sqlx::query("INSERT INTO conversations DEFAULT VALUES RETURNING id")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to insert conversation", e))?;

        let id: uuid::Uuid = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("Failed to read conversation id", e))?;

        Ok(ConversationId::from_uuid(id))
    }

    async fn insert_message(
        &self,
        conversation_id: &ConversationId,
        sender: Sender,
        text: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO messages (conversation_id, sender, text)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(conversation_id.as_uuid())
        .bind(sender.as_str())
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert message", e))?;

        Ok(())
    }

    async fn select_messages(
        &self,
        conversation_id: &ConversationId,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        // LIMIT NULL is "no limit" in PostgreSQL.
        let sql = format!(
            r#"
            SELECT sender, text, timestamp
            FROM messages
            WHERE conversation_id = $1
            ORDER BY timestamp {order}, id {order}
            LIMIT $2
            "#,
            order = order.as_sql()
        );

        let rows = sqlx::query(&sql)
            .bind(conversation_id.as_uuid())
            .bind(limit.map(i64::from))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to fetch messages", e))?;

        rows.iter()
            .map(|row| {
                let sender: String = row
                    .try_get("sender")
                    .map_err(|e| map_sqlx_error("Failed to decode sender", e))?;
                let text: String = row
                    .try_get("text")
                    .map_err(|e| map_sqlx_error("Failed to decode text", e))?;
                let timestamp: chrono::DateTime<chrono::Utc> = row
                    .try_get("timestamp")
                    .map_err(|e| map_sqlx_error("Failed to decode timestamp", e))?;

                Ok(StoredMessage {
                    sender,
                    text,
                    timestamp: Timestamp::from_datetime(timestamp),
                })
            })
            .collect()
    }
}

// === Helper Functions ===

fn map_sqlx_error(context: &str, error: sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => StoreError::Connection(format!("{}: {}", context, error)),
        other => StoreError::Database(format!("{}: {}", context, other)),
    }
}
