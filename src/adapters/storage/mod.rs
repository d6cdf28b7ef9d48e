//! Storage Adapters
//!
//! Non-database implementations of the ConversationStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryConversationStore** - Keeps messages in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use chat_support::adapters::storage::InMemoryConversationStore;
//!
//! let store = InMemoryConversationStore::new();
//! let session_id = store.create_conversation().await?;
//! ```

mod in_memory_conversation_store;

pub use in_memory_conversation_store::InMemoryConversationStore;
