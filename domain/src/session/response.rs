//! Reasoning-engine response types.
//!
//! One reasoning step yields either tool invocations or a final textual
//! answer. Both arrive as an [`LlmResponse`] made of content blocks:
//!
//! ```text
//! complete(conversation, tools) → LlmResponse
//!   ├─ has_tool_calls()  → dispatch tool_calls(), then reason again
//!   └─ otherwise         → text_content() is the final answer
//! ```

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within an LLM response.
///
/// Tool-calling chat APIs return text and tool use requests side by side.
/// This enum models that structure independently of any provider.
///
/// # Examples
///
/// ```
/// use triage_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::Text("Let me search first.".to_string());
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_abc123".to_string(),
///     name: "search_issues".to_string(),
///     input: [("query".to_string(), serde_json::json!("nil pointer db.go"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_tool_use().is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text(String),

    /// A tool use request from the model.
    ///
    /// Nothing about `name` or `input` is trusted: both are resolved and
    /// validated against the [`ToolSpec`](crate::tool::ToolSpec) before
    /// anything executes.
    ToolUse {
        /// Provider-assigned ID for correlating with tool results (e.g. "call_abc123").
        id: String,
        /// Tool name as requested by the model.
        name: String,
        /// Arguments as requested by the model.
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &HashMap<String, serde_json::Value>)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
///
/// Informational only: the session decides on the presence of tool use
/// blocks, not on the stop reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response; the model is done.
    EndTurn,
    /// The model wants to call tools; execute them and return results.
    ToolUse,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A structured response from an LLM, supporting both text and tool use.
///
/// The return type of every reasoning step.
///
/// # Helper Methods
///
/// - [`text_content()`](Self::text_content): concatenate all text blocks
/// - [`tool_calls()`](Self::tool_calls): extract tool use blocks as `Vec<ToolCall>`
/// - [`has_tool_calls()`](Self::has_tool_calls): quick check for tool use
/// - [`from_text()`](Self::from_text): wrap a plain final answer
///
/// # Examples
///
/// ```
/// use triage_domain::session::response::{LlmResponse, ContentBlock, StopReason};
///
/// // Final answer
/// let response = LlmResponse::from_text("Found 1 existing issues:");
/// assert!(!response.has_tool_calls());
///
/// // Tool invocation
/// let response = LlmResponse {
///     content: vec![
///         ContentBlock::Text("Searching...".to_string()),
///         ContentBlock::ToolUse {
///             id: "call_1".to_string(),
///             name: "search_issues".to_string(),
///             input: [("query".to_string(), serde_json::json!("nil pointer"))]
///                 .into_iter().collect(),
///         },
///     ],
///     stop_reason: Some(StopReason::ToolUse),
///     model: Some("gpt-4o-mini".to_string()),
/// };
/// assert!(response.has_tool_calls());
/// assert_eq!(response.tool_calls().len(), 1);
/// assert_eq!(response.text_content(), "Searching...");
/// ```
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a text-only response (a final answer).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` content blocks as `Vec<ToolCall>`.
    ///
    /// Each `ToolUse` block is converted to a `ToolCall` with the
    /// `native_id` field set to the API-assigned ID.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_creates_text_only_response() {
        let response = LlmResponse::from_text("No existing issues found.");
        assert_eq!(response.text_content(), "No existing issues found.");
        assert!(!response.has_tool_calls());
        assert!(response.tool_calls().is_empty());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.model, None);
    }

    #[test]
    fn tool_calls_extraction() {
        let response = LlmResponse {
            content: vec![
                ContentBlock::Text("Searching first.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_abc123".to_string(),
                    name: "search_issues".to_string(),
                    input: [("query".to_string(), serde_json::json!("nil pointer"))]
                        .into_iter()
                        .collect(),
                },
                ContentBlock::Text(" Then creating.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_def456".to_string(),
                    name: "create_issue".to_string(),
                    input: [
                        ("title".to_string(), serde_json::json!("Bug: nil pointer")),
                        ("body".to_string(), serde_json::json!("trace")),
                    ]
                    .into_iter()
                    .collect(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
            model: Some("gpt-4o-mini".to_string()),
        };

        assert!(response.has_tool_calls());
        assert_eq!(response.text_content(), "Searching first. Then creating.");

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tool_name, "search_issues");
        assert_eq!(calls[0].native_id, Some("call_abc123".to_string()));
        assert_eq!(calls[0].get_string("query"), Some("nil pointer"));
        assert_eq!(calls[1].tool_name, "create_issue");
        assert_eq!(calls[1].get_string("title"), Some("Bug: nil pointer"));
    }

    #[test]
    fn empty_response() {
        let response = LlmResponse {
            content: vec![],
            stop_reason: None,
            model: None,
        };

        assert_eq!(response.text_content(), "");
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn content_block_accessors() {
        let text = ContentBlock::Text("hello".to_string());
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_tool_use().is_none());

        let tool = ContentBlock::ToolUse {
            id: "id1".to_string(),
            name: "search_issues".to_string(),
            input: HashMap::new(),
        };
        assert!(tool.as_text().is_none());
        let (id, name, input) = tool.as_tool_use().unwrap();
        assert_eq!(id, "id1");
        assert_eq!(name, "search_issues");
        assert!(input.is_empty());
    }
}
