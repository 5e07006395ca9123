//! Issue tool executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! [`IssueToolExecutor`] binds the declarative triage tool contracts to an
//! [`IssueTrackerPort`]. The session has already resolved aliases and
//! validated arguments by the time a call gets here; the executor routes by
//! canonical name and turns every tracker outcome into a [`ToolResult`].
//!
//! ```text
//! ToolExecutorPort::execute()
//!   ├─ search_issues → issues::execute_search_issues()
//!   ├─ create_issue  → issues::execute_create_issue()
//!   └─ otherwise     → NOT_FOUND failure
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use triage_application::ports::issue_tracker::IssueTrackerPort;
use triage_application::ports::tool_executor::ToolExecutorPort;
use triage_domain::tool::{
    catalog::{CREATE_ISSUE, SEARCH_ISSUES, triage_tool_spec},
    entities::{ToolCall, ToolSpec},
    value_objects::{ToolError, ToolResult},
};

use super::issues;

/// Executor that runs the triage tools against an issue tracker.
#[derive(Clone)]
pub struct IssueToolExecutor {
    tool_spec: ToolSpec,
    tracker: Arc<dyn IssueTrackerPort>,
}

impl IssueToolExecutor {
    /// Create an executor exposing `search_issues` and `create_issue`.
    pub fn new(tracker: Arc<dyn IssueTrackerPort>) -> Self {
        Self {
            tool_spec: triage_tool_spec(),
            tracker,
        }
    }
}

#[async_trait]
impl ToolExecutorPort for IssueToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        match call.tool_name.as_str() {
            SEARCH_ISSUES => issues::execute_search_issues(self.tracker.as_ref(), call).await,
            CREATE_ISSUE => issues::execute_create_issue(self.tracker.as_ref(), call).await,
            other => ToolResult::failure(other, ToolError::unknown_tool(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use triage_application::ports::issue_tracker::TrackerError;
    use triage_domain::{IssueSummary, NewIssue, RepositoryRef};

    /// In-memory tracker recording every call.
    struct MockTracker {
        repository: RepositoryRef,
        existing: Vec<IssueSummary>,
        fail_with: Option<TrackerError>,
        searches: Mutex<Vec<String>>,
        created: Mutex<Vec<NewIssue>>,
    }

    impl MockTracker {
        fn new(existing: Vec<IssueSummary>) -> Self {
            Self {
                repository: RepositoryRef::new("acme", "api"),
                existing,
                fail_with: None,
                searches: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: TrackerError) -> Self {
            Self {
                fail_with: Some(error),
                ..Self::new(Vec::new())
            }
        }
    }

    #[async_trait]
    impl IssueTrackerPort for MockTracker {
        fn repository(&self) -> &RepositoryRef {
            &self.repository
        }

        async fn search(&self, query: &str) -> Result<Vec<IssueSummary>, TrackerError> {
            self.searches.lock().unwrap().push(query.to_string());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(self.existing.clone()),
            }
        }

        async fn create(&self, issue: &NewIssue) -> Result<IssueSummary, TrackerError> {
            self.created.lock().unwrap().push(issue.clone());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(IssueSummary::new(
                    issue.title.clone(),
                    "https://github.com/acme/api/issues/42",
                )),
            }
        }
    }

    fn executor(tracker: Arc<MockTracker>) -> IssueToolExecutor {
        IssueToolExecutor::new(tracker)
    }

    fn create_call(title: &str) -> ToolCall {
        ToolCall::new(CREATE_ISSUE)
            .with_arg("title", title)
            .with_arg("body", "panic: nil pointer in db.go:54")
            .with_arg("labels", serde_json::json!(["bug", "llm created", "p0"]))
    }

    #[test]
    fn test_executor_has_triage_tools() {
        let executor = executor(Arc::new(MockTracker::new(Vec::new())));
        assert_eq!(executor.available_tools(), vec![CREATE_ISSUE, SEARCH_ISSUES]);
        assert!(executor.get_tool("search_github_issues").is_some());
    }

    #[tokio::test]
    async fn test_search_without_matches() {
        let tracker = Arc::new(MockTracker::new(Vec::new()));
        let executor = executor(tracker.clone());

        let result = executor
            .execute(&ToolCall::new(SEARCH_ISSUES).with_arg("query", "nil pointer db.go"))
            .await;

        assert!(result.is_success());
        assert_eq!(result.output(), Some("No existing issues found for this query."));
        assert_eq!(result.metadata.match_count, Some(0));
        assert!(result.metadata.issue_url.is_none());
        assert_eq!(*tracker.searches.lock().unwrap(), vec!["nil pointer db.go"]);
    }

    #[tokio::test]
    async fn test_search_with_match() {
        let tracker = Arc::new(MockTracker::new(vec![IssueSummary::new(
            "nil pointer in db",
            "https://github.com/acme/api/issues/7",
        )]));
        let executor = executor(tracker);

        let result = executor
            .execute(&ToolCall::new(SEARCH_ISSUES).with_arg("query", "nil pointer"))
            .await;

        assert_eq!(
            result.output(),
            Some("Found 1 existing issues:\n- Title: \"nil pointer in db\", URL: https://github.com/acme/api/issues/7")
        );
        assert_eq!(result.metadata.match_count, Some(1));
        assert_eq!(
            result.metadata.issue_url.as_deref(),
            Some("https://github.com/acme/api/issues/7")
        );
    }

    #[tokio::test]
    async fn test_search_failure_is_text() {
        let tracker = Arc::new(MockTracker::failing(TrackerError::Unauthorized {
            status: 401,
            message: "Bad credentials".to_string(),
        }));
        let executor = executor(tracker);

        let result = executor
            .execute(&ToolCall::new(SEARCH_ISSUES).with_arg("query", "nil pointer"))
            .await;

        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert_eq!(error.code, ToolError::UPSTREAM_ERROR);
        assert!(error.message.starts_with("Error searching GitHub issues: "));
        assert!(error.message.contains("Bad credentials"));
    }

    #[tokio::test]
    async fn test_create_filters_labels() {
        let tracker = Arc::new(MockTracker::new(Vec::new()));
        let executor = executor(tracker.clone());

        let result = executor.execute(&create_call("Bug: nil pointer in db")).await;

        assert!(result.is_success());
        assert_eq!(
            result.output(),
            Some("GitHub issue created successfully! Title: \"Bug: nil pointer in db\", URL: https://github.com/acme/api/issues/42")
        );
        assert_eq!(
            result.metadata.issue_url.as_deref(),
            Some("https://github.com/acme/api/issues/42")
        );

        let created = tracker.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].labels, vec!["bug", "llm created"]);
    }

    #[tokio::test]
    async fn test_create_with_empty_title_never_calls_tracker() {
        let tracker = Arc::new(MockTracker::new(Vec::new()));
        let executor = executor(tracker.clone());

        let result = executor.execute(&create_call("")).await;

        assert!(!result.is_success());
        assert!(result.error().unwrap().is_invalid_argument());
        assert!(tracker.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_is_text() {
        let tracker = Arc::new(MockTracker::failing(TrackerError::Rejected {
            status: 422,
            message: "Validation Failed".to_string(),
        }));
        let executor = executor(tracker);

        let result = executor.execute(&create_call("Bug")).await;

        let error = result.error().unwrap();
        assert_eq!(error.code, ToolError::UPSTREAM_ERROR);
        assert!(error.message.starts_with("Error creating GitHub issue: "));
        assert!(error.message.contains("422"));
    }

    #[tokio::test]
    async fn test_executor_unknown_tool() {
        let executor = executor(Arc::new(MockTracker::new(Vec::new())));
        let result = executor.execute(&ToolCall::new("delete_issue")).await;
        assert_eq!(result.error().unwrap().code, ToolError::NOT_FOUND);
    }
}
