//! Execution parameters for the session loop.
//!
//! [`ExecutionParams`] groups the static parameters that control the
//! reasoning/dispatch loop in [`RunTriageUseCase`](crate::use_cases::run_triage::RunTriageUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Session loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum reasoning steps that may request tools in one session.
    /// A session still asking for tools after this many turns fails.
    pub max_tool_turns: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self { max_tool_turns: 10 }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }
}
