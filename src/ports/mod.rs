//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the chat core and the outside world. Adapters implement these ports.
//!
//! - `ConversationStore` - durable conversation and message log
//! - `AIProvider` - LLM completion service

mod ai_provider;
mod conversation_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    ProviderInfo, RequestMetadata,
};
pub use conversation_store::{ConversationStore, SortOrder, StoreError};
