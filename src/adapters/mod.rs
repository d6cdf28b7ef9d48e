//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI-compatible completion provider and a scripted mock
//! - `http` - axum routes for the chat API
//! - `postgres` - PostgreSQL conversation store
//! - `storage` - in-memory conversation store

pub mod ai;
pub mod http;
pub mod postgres;
pub mod storage;
