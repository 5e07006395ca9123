//! Issue tools: search_issues, create_issue
//!
//! Both tools speak to the issue tracker through [`IssueTrackerPort`] and
//! report every outcome as a [`ToolResult`]. The output text is what the
//! reasoning engine reads; the metadata carries the same facts in structured
//! form.
//!
//! # Output
//!
//! | Tool | Outcome | Text |
//! |------|---------|------|
//! | `search_issues` | no match | `No existing issues found for this query.` |
//! | `search_issues` | matches | `Found <n> existing issues:` + one `- Title: "<t>", URL: <u>` line each |
//! | `create_issue` | created | `GitHub issue created successfully! Title: "<t>", URL: <u>` |
//! | either | tracker failure | `Error searching GitHub issues: <e>` / `Error creating GitHub issue: <e>` |

use std::time::Instant;
use tracing::warn;
use triage_application::ports::issue_tracker::IssueTrackerPort;
use triage_domain::tool::{
    catalog::{ALLOWED_LABELS, CREATE_ISSUE, SEARCH_ISSUES},
    entities::ToolCall,
    value_objects::{ToolError, ToolResult},
};
use triage_domain::{IssueSummary, NewIssue};

pub const NO_ISSUES_FOUND: &str = "No existing issues found for this query.";

/// Format search matches the way the engine is instructed to quote them.
pub fn format_search_results(issues: &[IssueSummary]) -> String {
    if issues.is_empty() {
        return NO_ISSUES_FOUND.to_string();
    }
    let lines: Vec<String> = issues
        .iter()
        .map(|issue| format!("- Title: \"{}\", URL: {}", issue.title, issue.url))
        .collect();
    format!("Found {} existing issues:\n{}", issues.len(), lines.join("\n"))
}

/// Execute `search_issues`.
pub async fn execute_search_issues(tracker: &dyn IssueTrackerPort, call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let query = match call.require_string("query") {
        Ok(q) => q,
        Err(e) => return ToolResult::failure(SEARCH_ISSUES, ToolError::invalid_argument(e)),
    };

    match tracker.search(query).await {
        Ok(issues) => {
            let mut result = ToolResult::success(SEARCH_ISSUES, format_search_results(&issues))
                .with_match_count(issues.len())
                .with_duration(start.elapsed().as_millis() as u64);
            if let Some(first) = issues.first() {
                result = result.with_issue_url(&first.url);
            }
            result
        }
        Err(e) => {
            warn!(query, "Error searching GitHub issues: {}", e);
            ToolResult::failure(
                SEARCH_ISSUES,
                ToolError::upstream(format!("Error searching GitHub issues: {}", e)),
            )
            .with_duration(start.elapsed().as_millis() as u64)
        }
    }
}

/// Read and check the `create_issue` arguments.
///
/// Title and body must be non-blank strings. Labels outside the allowed set
/// (or not strings at all) are dropped without complaint.
pub fn new_issue_from_call(call: &ToolCall) -> Result<NewIssue, ToolError> {
    let title = call
        .require_string("title")
        .map_err(ToolError::invalid_argument)?;
    if title.trim().is_empty() {
        return Err(ToolError::invalid_argument(
            "Argument 'title' must not be empty",
        ));
    }

    let body = call
        .require_string("body")
        .map_err(ToolError::invalid_argument)?;
    if body.trim().is_empty() {
        return Err(ToolError::invalid_argument(
            "Argument 'body' must not be empty",
        ));
    }

    let labels = call
        .get_string_list("labels")
        .into_iter()
        .filter(|label| ALLOWED_LABELS.contains(label));

    Ok(NewIssue::new(title, body).with_labels(labels))
}

/// Execute `create_issue`.
pub async fn execute_create_issue(tracker: &dyn IssueTrackerPort, call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let issue = match new_issue_from_call(call) {
        Ok(issue) => issue,
        Err(e) => return ToolResult::failure(CREATE_ISSUE, e),
    };

    match tracker.create(&issue).await {
        Ok(created) => ToolResult::success(
            CREATE_ISSUE,
            format!(
                "GitHub issue created successfully! Title: \"{}\", URL: {}",
                created.title, created.url
            ),
        )
        .with_issue_url(created.url)
        .with_duration(start.elapsed().as_millis() as u64),
        Err(e) => {
            warn!(title = %issue.title, "Error creating GitHub issue: {}", e);
            ToolResult::failure(
                CREATE_ISSUE,
                ToolError::upstream(format!("Error creating GitHub issue: {}", e)),
            )
            .with_duration(start.elapsed().as_millis() as u64)
        }
    }
}
