//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresConversationStore` - Conversations and messages
//! - `connect_pool` - Builds the shared `PgPool` from configuration

mod conversation_store;
mod pool;

pub use conversation_store::PostgresConversationStore;
pub use pool::connect_pool;
