//! Chat command and query handlers.

mod get_history;
mod send_message;

pub use get_history::{GetHistoryError, GetHistoryHandler, GetHistoryQuery};
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult, CONTEXT_WINDOW,
    FALLBACK_REPLY,
};
