//! Tool Executor port
//!
//! Defines the interface for executing the tools the reasoning engine asks for.

use async_trait::async_trait;
use triage_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// Implementations (adapters) live in the infrastructure layer. Execution
/// never fails at the type level: every failure is a [`ToolResult`] whose
/// text is handed to the reasoning engine.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Get the definition of a tool by canonical name or alias
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get_resolved(name)
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tool_spec().names().collect();
        names.sort_unstable();
        names
    }

    /// Execute a call whose tool name is canonical and whose arguments have
    /// passed validation.
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
