//! Run Triage use case.
//!
//! Drives one triage session: the reasoning engine reads the error log,
//! asks for tools, reads their results, and eventually answers in text.
//!
//! ```text
//! conversation = [system instruction, error log]
//! loop
//!   response = gateway.complete(conversation, tools)
//!   no tool calls → final answer, done
//!   otherwise     → dispatch each call in order, append results, repeat
//! ```
//!
//! Dispatch never trusts the engine: names are resolved against the
//! [`ToolSpec`](triage_domain::ToolSpec), arguments are validated, and the
//! [`DispatchPolicy`] holds back `create_issue` until a search has succeeded.
//! Every dispatch failure becomes a tool result the engine can read.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::tool_helpers::tool_args_preview;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use triage_domain::util::truncate_str;
use triage_domain::{
    Conversation, DefaultToolValidator, DispatchPolicy, DomainError, RepositoryRef,
    SessionEvidence, ToolCall, ToolError, ToolResult, ToolValidator, TriagePromptTemplate,
    TriageRequest, TriageResponse, synthesize,
};
use uuid::Uuid;

/// Errors that end a triage session without an answer.
#[derive(Error, Debug)]
pub enum RunTriageError {
    #[error("{0}")]
    InvalidInput(#[from] DomainError),

    #[error("Reasoning engine failed: {0}")]
    Pipeline(#[from] GatewayError),

    #[error("Reasoning engine returned an empty answer")]
    EmptyResponse,

    #[error("Tool loop exceeded max_tool_turns ({0})")]
    ToolTurnLimitExceeded(usize),

    #[error("Triage cancelled")]
    Cancelled,
}

impl RunTriageError {
    /// Whether the caller is at fault (as opposed to the pipeline).
    pub fn is_client_error(&self) -> bool {
        matches!(self, RunTriageError::InvalidInput(e) if e.is_client_error())
    }
}

/// Result of a completed session.
#[derive(Debug, Clone)]
pub struct TriageOutcome {
    /// Correlation id of the session (also on every log line of the run)
    pub run_id: Uuid,
    /// The engine's final answer, verbatim
    pub answer: String,
    /// Number of reasoning steps that requested tools
    pub tool_turns: usize,
    /// What the tools reported during the session
    pub evidence: SessionEvidence,
}

impl TriageOutcome {
    /// Synthesize the caller-facing response.
    pub fn response(&self) -> TriageResponse {
        synthesize(&self.answer, &self.evidence)
    }
}

/// Use case for triaging one error log.
///
/// Holds only shared, stateless collaborators; all per-request state (the
/// conversation, the dispatch policy) lives inside [`execute`](Self::execute),
/// so one instance serves concurrent requests.
#[derive(Clone)]
pub struct RunTriageUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
    repository: RepositoryRef,
    execution: ExecutionParams,
}

impl RunTriageUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
        repository: RepositoryRef,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
            conversation_logger: Arc::new(NoConversationLogger),
            repository,
            execution: ExecutionParams::default(),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_execution_params(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    /// Run a session for `request` until the engine answers.
    ///
    /// The request is validated before anything else happens; an invalid
    /// request never reaches the engine or the tracker. Cancelling `cancel`
    /// stops the session at the next await point, including a tool call in
    /// flight.
    pub async fn execute(
        &self,
        request: TriageRequest,
        cancel: CancellationToken,
    ) -> Result<TriageOutcome, RunTriageError> {
        request.validate()?;

        let run_id = Uuid::new_v4();
        let span = info_span!("triage", %run_id);
        self.run(run_id, request, cancel).instrument(span).await
    }

    async fn run(
        &self,
        run_id: Uuid,
        request: TriageRequest,
        cancel: CancellationToken,
    ) -> Result<TriageOutcome, RunTriageError> {
        info!(
            repository = %self.repository,
            model = self.gateway.model_name(),
            "Starting triage: {}",
            truncate_str(&request.error_log, 100)
        );

        self.conversation_logger.log(ConversationEvent::new(
            "triage_started",
            serde_json::json!({
                "run_id": run_id.to_string(),
                "repository": self.repository.to_string(),
                "model": self.gateway.model_name(),
                "bytes": request.error_log.len(),
                "error_log": request.error_log,
            }),
        ));

        let mut conversation = Conversation::new(
            TriagePromptTemplate::system(&self.repository),
            request.error_log,
        );

        let result = self.drive(run_id, &mut conversation, &cancel).await;

        match &result {
            Ok(outcome) => {
                info!(
                    tool_turns = outcome.tool_turns,
                    issue_url = ?outcome.evidence.created_issue_url,
                    "Triage completed"
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "triage_completed",
                    serde_json::json!({
                        "run_id": run_id.to_string(),
                        "tool_turns": outcome.tool_turns,
                        "bytes": outcome.answer.len(),
                        "answer": outcome.answer,
                    }),
                ));
            }
            Err(e) => {
                warn!(error = %e, "Triage failed");
                self.conversation_logger.log(ConversationEvent::new(
                    "triage_failed",
                    serde_json::json!({
                        "run_id": run_id.to_string(),
                        "error": e.to_string(),
                        "tool_results": conversation.tool_results().len(),
                    }),
                ));
            }
        }

        result
    }

    async fn drive(
        &self,
        run_id: Uuid,
        conversation: &mut Conversation,
        cancel: &CancellationToken,
    ) -> Result<TriageOutcome, RunTriageError> {
        let tools = self
            .tool_schema
            .all_tools_schema(self.tool_executor.tool_spec());
        let max_turns = self.execution.max_tool_turns;
        let mut policy = DispatchPolicy::new();
        let mut turn_count = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(RunTriageError::Cancelled);
            }

            debug!(
                "Reasoning step {}: {} messages, {} tools",
                turn_count + 1,
                conversation.messages().len(),
                tools.len()
            );

            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RunTriageError::Cancelled),
                response = self.gateway.complete(conversation, &tools) => response?,
            };

            let tool_calls = response.tool_calls();
            conversation.push_assistant(&response);

            if tool_calls.is_empty() {
                let answer = response.text_content();
                if answer.trim().is_empty() {
                    return Err(RunTriageError::EmptyResponse);
                }
                return Ok(TriageOutcome {
                    run_id,
                    answer,
                    tool_turns: turn_count,
                    evidence: SessionEvidence::from_tool_results(conversation.tool_results()),
                });
            }

            turn_count += 1;
            if turn_count > max_turns {
                warn!("Triage tool loop exceeded max_tool_turns ({})", max_turns);
                return Err(RunTriageError::ToolTurnLimitExceeded(max_turns));
            }

            // Sequential: a create must observe the outcome of the search
            // requested before it in the same step.
            for call in &tool_calls {
                let result = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        warn!(tool = %call.tool_name, "Cancelled during tool call");
                        return Err(RunTriageError::Cancelled);
                    }
                    result = self.dispatch(run_id, call, &mut policy) => result,
                };
                conversation.push_tool_result(call, result);
            }

            debug!(
                "Tool turn {}/{}: dispatched {} calls",
                turn_count,
                max_turns,
                tool_calls.len()
            );
        }
    }

    /// Resolve, validate, police, then execute a single call.
    async fn dispatch(
        &self,
        run_id: Uuid,
        call: &ToolCall,
        policy: &mut DispatchPolicy,
    ) -> ToolResult {
        let Some(definition) = self.tool_executor.get_tool(&call.tool_name) else {
            warn!(tool = %call.tool_name, "Engine requested an unknown tool");
            let available = self.tool_executor.available_tools().join(", ");
            let error = ToolError::unknown_tool(&call.tool_name);
            let error = ToolError::new(
                error.code,
                format!("{}. Available tools: {}", error.message, available),
            );
            return ToolResult::failure(&call.tool_name, error);
        };

        let mut call = call.clone().renamed(definition.name.clone());
        let dropped = call.drop_undeclared(definition);
        if !dropped.is_empty() {
            debug!(tool = %call.tool_name, ?dropped, "Ignoring undeclared arguments");
        }

        if let Err(message) = DefaultToolValidator.validate(&call, definition) {
            warn!(tool = %call.tool_name, "Rejected tool arguments: {}", message);
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(message));
        }

        if let Err(error) = policy.check(definition) {
            warn!(tool = %call.tool_name, "Blocked by dispatch policy");
            return ToolResult::failure(&call.tool_name, error);
        }

        info!(
            tool = %call.tool_name,
            "Calling tool: {}",
            tool_args_preview(&call)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({
                "run_id": run_id.to_string(),
                "tool": call.tool_name,
                "args": call.arguments,
            }),
        ));

        let result = self.tool_executor.execute(&call).await;
        policy.record(definition, &result);

        if result.is_success() {
            debug!(
                tool = %call.tool_name,
                duration_ms = result.metadata.duration_ms.unwrap_or(0),
                "Tool succeeded"
            );
        } else {
            warn!(
                tool = %call.tool_name,
                "Tool failed: {}",
                result.text_for_model()
            );
        }

        self.conversation_logger.log(ConversationEvent::new(
            "tool_result",
            serde_json::json!({
                "run_id": run_id.to_string(),
                "tool": call.tool_name,
                "success": result.is_success(),
                "output": result.text_for_model(),
                "metadata": result.metadata,
            }),
        ));

        result
    }
}
