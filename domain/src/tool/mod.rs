//! Tool domain module
//!
//! This module defines the contract between the reasoning engine and the
//! deterministic, side-effecting actions it may invoke.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (text + data)│
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "search_github_issues" → "search_issues"
//!        └─ tools:   "search_issues" → ToolDefinition
//! ```
//!
//! Tool calls arrive untyped from the engine. They are resolved through the
//! alias table and checked by a [`ToolValidator`] before any executor runs;
//! a failed check becomes a textual [`ToolResult`] for the engine, never a
//! session fault.
//!
//! # Architecture
//!
//! - **Domain** (this module): definitions, validation, the triage tool catalog
//! - **Application** (`ToolExecutorPort`): port trait for tool execution
//! - **Infrastructure** (`IssueToolExecutor`): binds the tools to the issue tracker

pub mod catalog;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
