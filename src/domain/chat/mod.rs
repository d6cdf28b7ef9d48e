//! Chat domain - messages exchanged between a customer and the support assistant.

mod knowledge;
mod message;

pub use knowledge::{StoreKnowledge, DEFAULT_AGENT_NAME, DEFAULT_STORE_KNOWLEDGE};
pub use message::{MessageText, Sender, StoredMessage, MAX_MESSAGE_CHARS};
