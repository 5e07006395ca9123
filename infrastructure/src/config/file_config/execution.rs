//! Session loop configuration from TOML (`[execution]` section)

use serde::{Deserialize, Serialize};
use triage_application::ExecutionParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Reasoning steps that may request tools before the session fails
    pub max_tool_turns: usize,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            max_tool_turns: ExecutionParams::default().max_tool_turns,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default().with_max_tool_turns(self.max_tool_turns)
    }
}
