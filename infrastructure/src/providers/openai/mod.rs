//! OpenAI chat-completions provider
//!
//! Function-calling models reached over plain HTTPS with an API key.

mod gateway;
mod types;

pub use gateway::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiLlmGateway};
