//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps and validation errors used across the chat domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::ConversationId;
pub use timestamp::Timestamp;
