//! Chat-completions wire types and conversions to/from domain types
//!
//! The API is stateless: every request carries the whole conversation.
//! Tool arguments travel as JSON-encoded strings in both directions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use triage_application::ports::llm_gateway::GatewayError;
use triage_domain::{ContentBlock, Conversation, LlmResponse, Message, Role, StopReason};

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ChatTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ChatToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: ChatFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatFunctionCall {
    pub name: String,
    /// JSON-encoded argument object
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub struct ChatTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: ChatFunctionDef,
}

#[derive(Debug, Serialize)]
pub struct ChatFunctionDef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

fn function_type() -> String {
    "function".to_string()
}

// ─── Domain → Chat ───────────────────────────────────────────────

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

/// Convert one domain message to its wire form.
pub fn convert_message(message: &Message) -> ChatMessage {
    let tool_calls: Vec<ChatToolCall> = message
        .tool_calls
        .iter()
        .map(|call| ChatToolCall {
            id: call.native_id.clone().unwrap_or_default(),
            kind: function_type(),
            function: ChatFunctionCall {
                name: call.tool_name.clone(),
                arguments: serde_json::to_string(&call.arguments)
                    .unwrap_or_else(|_| "{}".to_string()),
            },
        })
        .collect();

    // An assistant turn that only calls tools has no content.
    let content = if message.role == Role::Assistant
        && message.content.is_empty()
        && !tool_calls.is_empty()
    {
        None
    } else {
        Some(message.content.clone())
    };

    ChatMessage {
        role: role_name(message.role).to_string(),
        content,
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
    }
}

pub fn convert_conversation(conversation: &Conversation) -> Vec<ChatMessage> {
    conversation.messages().iter().map(convert_message).collect()
}

/// Convert a provider-neutral tool schema (from `ToolSchemaPort`) to a function tool.
pub fn convert_tool_schema(schema: &serde_json::Value) -> Option<ChatTool> {
    let name = schema.get("name")?.as_str()?;
    let description = schema
        .get("description")
        .and_then(|d| d.as_str())
        .map(str::to_string);
    let parameters = schema.get("input_schema").cloned().unwrap_or_else(|| {
        serde_json::json!({
            "type": "object",
            "properties": {},
        })
    });

    Some(ChatTool {
        kind: "function",
        function: ChatFunctionDef {
            name: name.to_string(),
            description,
            parameters,
        },
    })
}

// ─── Chat → Domain ───────────────────────────────────────────────

pub fn convert_finish_reason(reason: &str) -> StopReason {
    match reason {
        "stop" => StopReason::EndTurn,
        "tool_calls" | "function_call" => StopReason::ToolUse,
        "length" => StopReason::MaxTokens,
        other => StopReason::Other(other.to_string()),
    }
}

/// Decode JSON-encoded arguments into an argument map.
///
/// Malformed or non-object arguments decode to an empty map; validation then
/// reports the missing parameters back to the engine.
pub fn decode_arguments(tool: &str, raw: &str) -> HashMap<String, serde_json::Value> {
    if raw.trim().is_empty() {
        return HashMap::new();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
        Ok(_) | Err(_) => {
            warn!(tool, "Engine sent tool arguments that are not a JSON object");
            HashMap::new()
        }
    }
}

/// Convert a chat-completions response to a domain `LlmResponse`.
pub fn convert_response(response: ChatResponse) -> Result<LlmResponse, GatewayError> {
    let model = response.model;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content
        && !text.is_empty()
    {
        content.push(ContentBlock::Text(text));
    }
    for call in choice.message.tool_calls {
        let input = decode_arguments(&call.function.name, &call.function.arguments);
        content.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.function.name,
            input,
        });
    }

    Ok(LlmResponse {
        content,
        stop_reason: choice.finish_reason.as_deref().map(convert_finish_reason),
        model,
    })
}
