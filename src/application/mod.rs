//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write to the conversation store; query handlers only read.

pub mod handlers;

pub use handlers::{
    GetHistoryError, GetHistoryHandler, GetHistoryQuery, SendMessageCommand, SendMessageError,
    SendMessageHandler, SendMessageResult, CONTEXT_WINDOW, FALLBACK_REPLY,
};
