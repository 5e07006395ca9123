//! LLM Gateway port
//!
//! Defines the interface for communicating with the reasoning engine.

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::{Conversation, LlmResponse};

/// Errors that can occur during LLM gateway operations
///
/// Every variant is terminal for the session that hit it.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the reasoning engine
///
/// One call is one reasoning step: given the conversation so far and the
/// declared tools, the engine answers with tool invocations or a final
/// answer. Implementations are stateless and shared by all sessions; the
/// conversation is owned by the caller.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Run one reasoning step.
    ///
    /// `tools` are provider-neutral JSON schemas from
    /// [`ToolSchemaPort`](crate::ports::tool_schema::ToolSchemaPort).
    async fn complete(
        &self,
        conversation: &Conversation,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;

    /// Identifier of the model behind this gateway (for logs)
    fn model_name(&self) -> &str;
}
