//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, validation errors)
//! - `chat` - Support chat messages and the store knowledge preamble

pub mod chat;
pub mod foundation;
