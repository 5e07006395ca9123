//! Tool domain value objects: immutable result and error types
//!
//! Every tool execution produces a [`ToolResult`]. Failures carry a
//! [`ToolError`] whose message is what the reasoning engine reads, so it
//! can rephrase, retry, or report the failure to the end user.

use serde::{Deserialize, Serialize};

/// Error that occurred while dispatching or executing a tool.
///
/// | Code | Meaning |
/// |------|---------|
/// | `INVALID_ARGUMENT` | Missing, mistyped or blank arguments |
/// | `NOT_FOUND` | Unknown tool name |
/// | `UPSTREAM_ERROR` | The issue tracker failed or rejected the request |
/// | `POLICY_VIOLATION` | The call breaks the session's dispatch policy |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "INVALID_ARGUMENT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const UPSTREAM_ERROR: &'static str = "UPSTREAM_ERROR";
    pub const POLICY_VIOLATION: &'static str = "POLICY_VIOLATION";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new(Self::NOT_FOUND, format!("Unknown tool: {}", name.into()))
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(Self::UPSTREAM_ERROR, message)
    }

    pub fn policy_violation(message: impl Into<String>) -> Self {
        Self::new(Self::POLICY_VIOLATION, message)
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Self::INVALID_ARGUMENT
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Structured data returned alongside the text
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about a tool execution.
///
/// | Tool | `duration_ms` | `match_count` | `issue_url` |
/// |------|:---:|:---:|:---:|
/// | `search_issues` | yes | yes | first match |
/// | `create_issue` | yes | - | created issue |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// For search: number of matching issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
    /// URL of the issue found or created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_match_count(mut self, count: usize) -> Self {
        self.metadata.match_count = Some(count);
        self
    }

    pub fn with_issue_url(mut self, url: impl Into<String>) -> Self {
        self.metadata.issue_url = Some(url.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Text handed back to the reasoning engine: the output on success,
    /// the error message on failure.
    pub fn text_for_model(&self) -> String {
        match (&self.output, &self.error) {
            (_, Some(error)) => error.message.clone(),
            (Some(output), None) => output.clone(),
            (None, None) => String::new(),
        }
    }
}
