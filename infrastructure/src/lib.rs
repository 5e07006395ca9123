//! Infrastructure layer for issue-triage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the GitHub issue tracker, the chat-completions
//! gateway, the tool executor, the conversation logger, and configuration
//! file loading.

pub mod config;
pub mod github;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use github::GitHubIssueTracker;
pub use logging::JsonlConversationLogger;
pub use providers::openai::OpenAiLlmGateway;
pub use tools::{IssueToolExecutor, JsonSchemaToolConverter};
