//! SendMessage command handler.
//!
//! Persists a customer message, asks the completion provider for a reply
//! using the recent conversation history, and persists the reply.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::chat::{MessageText, Sender, StoreKnowledge, StoredMessage};
use crate::domain::foundation::ConversationId;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, ConversationStore, Message, MessageRole,
    RequestMetadata, SortOrder, StoreError,
};

/// Number of most recent messages sent to the provider as context.
pub const CONTEXT_WINDOW: u32 = 10;

/// Reply returned when the provider answers with no text.
pub const FALLBACK_REPLY: &str = "I am currently over capacity.";

/// Command to send a customer message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// Raw message text as received from the client.
    pub message: String,
    /// Existing conversation, or `None` to start a new one.
    pub session_id: Option<ConversationId>,
}

impl SendMessageCommand {
    pub fn new(message: impl Into<String>, session_id: Option<ConversationId>) -> Self {
        Self {
            message: message.into(),
            session_id,
        }
    }
}

/// Result of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResult {
    /// Assistant reply text.
    pub reply: String,
    /// Conversation the exchange was recorded in.
    pub session_id: ConversationId,
}

/// Errors that can occur when sending a message.
#[derive(Debug, Clone, Error)]
pub enum SendMessageError {
    /// Message is empty or whitespace only.
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// Completion provider failed or timed out.
    #[error("AI provider error: {0}")]
    AIProviderError(String),

    /// Conversation store failed.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<AIError> for SendMessageError {
    fn from(err: AIError) -> Self {
        SendMessageError::AIProviderError(err.to_string())
    }
}

impl From<StoreError> for SendMessageError {
    fn from(err: StoreError) -> Self {
        SendMessageError::StorageError(err.to_string())
    }
}

/// Handler for customer messages.
pub struct SendMessageHandler {
    store: Arc<dyn ConversationStore>,
    ai_provider: Arc<dyn AIProvider>,
    knowledge: Arc<StoreKnowledge>,
}

impl SendMessageHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        store: Arc<dyn ConversationStore>,
        ai_provider: Arc<dyn AIProvider>,
        knowledge: Arc<StoreKnowledge>,
    ) -> Self {
        Self {
            store,
            ai_provider,
            knowledge,
        }
    }

    /// Handles a send message command.
    ///
    /// The user message is stored before the provider is called, so it stays
    /// recorded even when the provider fails. The assistant reply is stored
    /// only on success.
    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        let text = MessageText::parse(&cmd.message).map_err(|_| SendMessageError::EmptyMessage)?;

        let session_id = match cmd.session_id {
            Some(id) => id,
            None => {
                let id = self.store.create_conversation().await.map_err(|e| {
                    error!(error = %e, "failed to create conversation");
                    SendMessageError::from(e)
                })?;
                debug!(session_id = %id, "started new conversation");
                id
            }
        };

        self.store
            .insert_message(&session_id, Sender::User, text.as_str())
            .await
            .map_err(|e| {
                error!(session_id = %session_id, error = %e, "failed to store user message");
                SendMessageError::from(e)
            })?;

        let mut recent = self
            .store
            .select_messages(&session_id, SortOrder::Descending, Some(CONTEXT_WINDOW))
            .await
            .map_err(|e| {
                error!(session_id = %session_id, error = %e, "failed to load conversation context");
                SendMessageError::from(e)
            })?;
        recent.reverse();

        let request = self.build_request(session_id, &recent);

        let response = match self.ai_provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    session_id = %session_id,
                    provider = %self.ai_provider.provider_info().name,
                    error = %e,
                    "completion failed"
                );
                return Err(e.into());
            }
        };

        let reply = if response.content.is_empty() {
            FALLBACK_REPLY.to_string()
        } else {
            response.content
        };

        self.store
            .insert_message(&session_id, Sender::Ai, &reply)
            .await
            .map_err(|e| {
                error!(session_id = %session_id, error = %e, "failed to store assistant reply");
                SendMessageError::from(e)
            })?;

        Ok(SendMessageResult { reply, session_id })
    }

    fn build_request(&self, session_id: ConversationId, history: &[StoredMessage]) -> CompletionRequest {
        let metadata = RequestMetadata::new(session_id, format!("chat-{}", Uuid::new_v4()));

        CompletionRequest::new(metadata)
            .with_message(MessageRole::System, self.knowledge.system_prompt())
            .with_messages(history.iter().map(|m| {
                if m.is_from_user() {
                    Message::user(&m.text)
                } else {
                    Message::assistant(&m.text)
                }
            }))
    }
}
