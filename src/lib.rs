//! Chat Support - customer support chat backend
//!
//! Accepts customer messages over HTTP, keeps each conversation in
//! PostgreSQL, and answers using an OpenAI-compatible completion provider
//! primed with a fixed store-knowledge preamble.
//!
//! Layout:
//! - `domain` - message text rules, senders, store knowledge
//! - `ports` - conversation store and completion provider interfaces
//! - `application` - send-message and history handlers
//! - `adapters` - PostgreSQL, in-memory, OpenAI-compatible and HTTP implementations
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
