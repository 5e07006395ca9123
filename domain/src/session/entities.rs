//! Session domain entities

use super::response::LlmResponse;
use crate::tool::{ToolCall, ToolResult};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Result of a tool invocation, correlated by `tool_call_id`
    Tool,
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Tool invocations requested by an assistant message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// For tool messages: id of the call this result answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// For tool messages: whether the tool failed
    #[serde(default)]
    pub is_error: bool,
}

impl Message {
    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            is_error: false,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content)
    }

    pub fn assistant_with_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::plain(Role::Assistant, content)
        }
    }

    pub fn tool(call_id: impl Into<String>, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            is_error,
            ..Self::plain(Role::Tool, content)
        }
    }
}

/// The running conversation of one triage session (Entity)
///
/// Opens with the system instruction and the error log; grows by one
/// assistant message per reasoning step and one tool message per dispatched
/// call. Owned by a single session and dropped with it.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    tool_results: Vec<ToolResult>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>, opening: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::user(opening)],
            tool_results: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system_prompt(&self) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    /// Record an assistant turn (text plus any requested tool calls).
    pub fn push_assistant(&mut self, response: &LlmResponse) {
        self.messages.push(Message::assistant_with_calls(
            response.text_content(),
            response.tool_calls(),
        ));
    }

    /// Record the result of a dispatched call.
    pub fn push_tool_result(&mut self, call: &ToolCall, result: ToolResult) {
        let call_id = call
            .native_id
            .clone()
            .unwrap_or_else(|| format!("call_{}", self.tool_results.len() + 1));
        self.messages.push(Message::tool(
            call_id,
            result.text_for_model(),
            !result.is_success(),
        ));
        self.tool_results.push(result);
    }

    /// All tool results of this session, in dispatch order.
    pub fn tool_results(&self) -> &[ToolResult] {
        &self.tool_results
    }

    pub fn last_tool_result(&self) -> Option<&ToolResult> {
        self.tool_results.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::response::ContentBlock;
    use crate::tool::ToolError;

    #[test]
    fn conversation_opens_with_instruction_and_log() {
        let conversation = Conversation::new("You are a triage agent", "nil pointer in db.go:54");
        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "nil pointer in db.go:54");
        assert_eq!(conversation.system_prompt(), "You are a triage agent");
    }

    #[test]
    fn push_assistant_and_tool_result() {
        let mut conversation = Conversation::new("sys", "log");
        let response = LlmResponse {
            content: vec![ContentBlock::ToolUse {
                id: "call_abc".to_string(),
                name: "search_issues".to_string(),
                input: [("query".to_string(), serde_json::json!("nil pointer"))]
                    .into_iter()
                    .collect(),
            }],
            stop_reason: None,
            model: None,
        };
        conversation.push_assistant(&response);

        let call = &response.tool_calls()[0];
        conversation.push_tool_result(
            call,
            ToolResult::failure("search_issues", ToolError::upstream("boom")),
        );

        let messages = conversation.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].tool_calls.len(), 1);
        assert_eq!(messages[3].role, Role::Tool);
        assert_eq!(messages[3].tool_call_id.as_deref(), Some("call_abc"));
        assert_eq!(messages[3].content, "boom");
        assert!(messages[3].is_error);
        assert!(!conversation.last_tool_result().unwrap().is_success());
    }

    #[test]
    fn tool_result_without_native_id_gets_generated_id() {
        let mut conversation = Conversation::new("sys", "log");
        let call = ToolCall::new("search_issues");
        conversation.push_tool_result(&call, ToolResult::success("search_issues", "ok"));
        assert_eq!(
            conversation.messages()[2].tool_call_id.as_deref(),
            Some("call_1")
        );
    }
}
