//! HTTP adapter for chat endpoints.
//!
//! - `POST /chat/message` - Send a customer message, receive the reply
//! - `GET /chat/history/:session_id` - Read a conversation transcript
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ChatApiError, ChatAppState};
pub use routes::{chat_router, chat_routes};
