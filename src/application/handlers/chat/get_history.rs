//! GetHistory query handler.

use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::domain::chat::StoredMessage;
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, SortOrder};

/// Query for the full transcript of a conversation.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub session_id: ConversationId,
}

#[derive(Debug, Clone, Error)]
pub enum GetHistoryError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Handler for reading conversation history.
pub struct GetHistoryHandler {
    store: Arc<dyn ConversationStore>,
}

impl GetHistoryHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Returns every message oldest first. Unknown conversations yield an
    /// empty list.
    pub async fn handle(&self, query: GetHistoryQuery) -> Result<Vec<StoredMessage>, GetHistoryError> {
        self.store
            .select_messages(&query.session_id, SortOrder::Ascending, None)
            .await
            .map_err(|e| {
                error!(session_id = %query.session_id, error = %e, "failed to load history");
                GetHistoryError::StorageError(e.to_string())
            })
    }
}
