//! Domain layer for issue-triage
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! The reasoning engine decides *which* action to take and *with what
//! arguments*; the [`tool`] module describes the actions it may take and
//! validates what it asks for before anything executes.
//!
//! ## Triage
//!
//! A triage turns one error log into a [`TriageResponse`]: the engine's
//! final answer plus the issue URL it refers to, if one can be located.

pub mod core;
pub mod issue;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod triage;
pub mod util;

// Re-export commonly used types
pub use core::error::DomainError;
pub use issue::{IssueSummary, NewIssue, RepositoryRef};
pub use prompt::TriagePromptTemplate;
pub use session::{
    entities::{Conversation, Message, Role},
    response::{ContentBlock, LlmResponse, StopReason},
};
pub use tool::{
    catalog::{ALLOWED_LABELS, CREATE_ISSUE, REQUIRED_LABELS, SEARCH_ISSUES, triage_tool_spec},
    entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
pub use triage::{
    DispatchPolicy, SessionEvidence, TriageRequest, TriageResponse, TriageStatus,
    extract_issue_url, synthesize,
};
