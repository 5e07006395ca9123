//! Reasoning session domain.
//!
//! - [`entities::Conversation`]: the running conversation of one triage session
//! - [`entities::Message`]: a single message within a conversation
//! - [`response::LlmResponse`]: one reasoning step's output (text and/or tool calls)

pub mod entities;
pub mod response;
