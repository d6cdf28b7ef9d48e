//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod chat;

pub use chat::{
    GetHistoryError, GetHistoryHandler, GetHistoryQuery, SendMessageCommand, SendMessageError,
    SendMessageHandler, SendMessageResult, CONTEXT_WINDOW, FALLBACK_REPLY,
};
