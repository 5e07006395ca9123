//! Dispatch policy enforced by the session.
//!
//! Tools with side effects (`create_issue`) are not idempotent and the
//! tracker does no deduplication, so a session only lets them through after
//! a read-only lookup (`search_issues`) has succeeded.

use crate::tool::ToolDefinition;
use crate::tool::ToolError;
use crate::tool::ToolResult;
use crate::tool::catalog::SEARCH_ISSUES;

#[derive(Debug, Clone, Default)]
pub struct DispatchPolicy {
    searched: bool,
}

impl DispatchPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a resolved tool before execution.
    pub fn check(&self, definition: &ToolDefinition) -> Result<(), ToolError> {
        if definition.has_side_effects() && !self.searched {
            return Err(ToolError::policy_violation(format!(
                "Refusing to call '{}' before a successful '{}' in this session. \
                 Search for existing issues first.",
                definition.name, SEARCH_ISSUES
            )));
        }
        Ok(())
    }

    /// Record the outcome of an executed call.
    pub fn record(&mut self, definition: &ToolDefinition, result: &ToolResult) {
        if !definition.has_side_effects() && result.is_success() {
            self.searched = true;
        }
    }

    pub fn has_searched(&self) -> bool {
        self.searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::catalog::{CREATE_ISSUE, triage_tool_spec};

    fn tool(name: &str) -> ToolDefinition {
        triage_tool_spec().get(name).unwrap().clone()
    }

    #[test]
    fn create_before_search_is_refused() {
        let policy = DispatchPolicy::new();
        let err = policy.check(&tool(CREATE_ISSUE)).unwrap_err();
        assert_eq!(err.code, ToolError::POLICY_VIOLATION);
        assert!(err.message.contains("'create_issue'"));
        assert!(policy.check(&tool(SEARCH_ISSUES)).is_ok());
    }

    #[test]
    fn create_after_successful_search_is_allowed() {
        let mut policy = DispatchPolicy::new();
        policy.record(
            &tool(SEARCH_ISSUES),
            &ToolResult::success(SEARCH_ISSUES, "none"),
        );
        assert!(policy.has_searched());
        assert!(policy.check(&tool(CREATE_ISSUE)).is_ok());
    }

    #[test]
    fn failed_search_does_not_unlock_create() {
        let mut policy = DispatchPolicy::new();
        policy.record(
            &tool(SEARCH_ISSUES),
            &ToolResult::failure(SEARCH_ISSUES, ToolError::upstream("401")),
        );
        assert!(policy.check(&tool(CREATE_ISSUE)).is_err());
    }

    #[test]
    fn successful_create_does_not_count_as_search() {
        let mut policy = DispatchPolicy::new();
        policy.record(
            &tool(CREATE_ISSUE),
            &ToolResult::success(CREATE_ISSUE, "created"),
        );
        assert!(!policy.has_searched());
    }

    #[test]
    fn gating_follows_risk_level_not_name() {
        use crate::tool::RiskLevel;

        let policy = DispatchPolicy::new();
        let close = ToolDefinition::new("close_issue", "Close an issue", RiskLevel::High);
        let read = ToolDefinition::new("get_issue", "Read an issue", RiskLevel::Low);
        assert!(policy.check(&close).is_err());
        assert!(policy.check(&read).is_ok());
    }
}
