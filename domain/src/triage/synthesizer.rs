//! Response synthesizer: final answer → [`TriageResponse`].
//!
//! Best-effort text scan. It relies on the engine echoing the phrasing of the
//! tool results (`GitHub issue created successfully! ... URL: <url>` or
//! `Found <n> existing issues: ... URL: <url>`). If the engine paraphrases,
//! the text scan finds nothing and the structured evidence collected from
//! the tools during the session is used instead.

use super::entities::{TriageResponse, TriageStatus};
use crate::tool::ToolResult;
use crate::tool::catalog::CREATE_ISSUE;
use regex::Regex;
use std::sync::LazyLock;

pub const CREATED_MARKER: &str = "GitHub issue created successfully!";
pub const FOUND_MARKER: &str = "Found existing issues:";
const URL_PREFIX: &str = "URL: ";

/// Either marker; the found marker also in its counted form.
static RESULT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"GitHub issue created successfully!|Found (?:\d+ )?existing issues:")
        .expect("result marker pattern is valid")
});

/// Facts a session gathered from its tool results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEvidence {
    /// URL returned by a successful `create_issue` in this session
    pub created_issue_url: Option<String>,
    /// Whether the last tool result of the session was a failure
    pub last_tool_failed: bool,
}

impl SessionEvidence {
    /// Collect evidence from a session's tool results, in dispatch order.
    pub fn from_tool_results(results: &[ToolResult]) -> Self {
        let created_issue_url = results
            .iter()
            .rev()
            .filter(|r| r.tool_name == CREATE_ISSUE && r.is_success())
            .find_map(|r| r.metadata.issue_url.clone());

        Self {
            created_issue_url,
            last_tool_failed: results.last().is_some_and(|r| !r.is_success()),
        }
    }
}

/// Extract the issue URL from the engine's answer.
///
/// Only answers carrying a result marker are scanned. The URL runs from
/// the first `URL: ` up to the next whitespace or the end of the string.
pub fn extract_issue_url(answer: &str) -> Option<String> {
    if !RESULT_MARKER.is_match(answer) {
        return None;
    }
    let start = answer.find(URL_PREFIX)? + URL_PREFIX.len();
    let rest = &answer[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let url = rest[..end].trim();
    (!url.is_empty()).then(|| url.to_string())
}

/// Build the caller-facing response from the final answer.
pub fn synthesize(answer: &str, evidence: &SessionEvidence) -> TriageResponse {
    let issue_url =
        extract_issue_url(answer).or_else(|| evidence.created_issue_url.clone());

    let status = if evidence.last_tool_failed && issue_url.is_none() {
        TriageStatus::Error
    } else {
        TriageStatus::Success
    };

    TriageResponse {
        status,
        message: answer.to_string(),
        issue_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_url_after_created_marker() {
        let answer = r#"GitHub issue created successfully! Title: "X", URL: https://x/42"#;
        assert_eq!(extract_issue_url(answer), Some("https://x/42".to_string()));
    }

    #[test]
    fn extracts_first_url_after_counted_found_marker() {
        let answer = "Found 2 existing issues:\n- Title: \"A\", URL: https://x/1\n- Title: \"B\", URL: https://x/2";
        assert_eq!(extract_issue_url(answer), Some("https://x/1".to_string()));
    }

    #[test]
    fn extracts_url_after_plain_found_marker() {
        let answer = "Found existing issues: URL: https://x/7 is the match.";
        assert_eq!(extract_issue_url(answer), Some("https://x/7".to_string()));
    }

    #[test]
    fn url_ends_at_newline() {
        let answer = "GitHub issue created successfully! URL: https://x/9\nThanks";
        assert_eq!(extract_issue_url(answer), Some("https://x/9".to_string()));
    }

    #[test]
    fn no_url_marker_yields_none() {
        let answer = "GitHub issue created successfully! Title: \"X\"";
        assert_eq!(extract_issue_url(answer), None);
    }

    #[test]
    fn url_without_result_marker_is_ignored() {
        let answer = "I could not decide. URL: https://x/1";
        assert_eq!(extract_issue_url(answer), None);
    }

    #[test]
    fn empty_url_is_none() {
        assert_eq!(extract_issue_url("GitHub issue created successfully! URL: "), None);
    }

    #[test]
    fn evidence_from_tool_results() {
        use crate::tool::ToolError;
        use crate::tool::catalog::SEARCH_ISSUES;

        let results = vec![
            ToolResult::success(SEARCH_ISSUES, "No existing issues found for this query.")
                .with_match_count(0),
            ToolResult::success(CREATE_ISSUE, "GitHub issue created successfully!")
                .with_issue_url("https://x/42"),
        ];
        let evidence = SessionEvidence::from_tool_results(&results);
        assert_eq!(evidence.created_issue_url.as_deref(), Some("https://x/42"));
        assert!(!evidence.last_tool_failed);

        let results = vec![ToolResult::failure(CREATE_ISSUE, ToolError::upstream("422"))];
        let evidence = SessionEvidence::from_tool_results(&results);
        assert!(evidence.created_issue_url.is_none());
        assert!(evidence.last_tool_failed);

        assert_eq!(SessionEvidence::from_tool_results(&[]), SessionEvidence::default());
    }

    #[test]
    fn synthesize_keeps_message_verbatim() {
        let answer = r#"GitHub issue created successfully! Title: "Bug: nil pointer in db", URL: https://x/42"#;
        let response = synthesize(answer, &SessionEvidence::default());
        assert_eq!(response.status, TriageStatus::Success);
        assert_eq!(response.message, answer);
        assert_eq!(response.issue_url.as_deref(), Some("https://x/42"));
    }

    #[test]
    fn synthesize_falls_back_to_created_issue() {
        let evidence = SessionEvidence {
            created_issue_url: Some("https://x/43".to_string()),
            last_tool_failed: false,
        };
        let response = synthesize("I opened a ticket for this crash.", &evidence);
        assert_eq!(response.issue_url.as_deref(), Some("https://x/43"));
    }

    #[test]
    fn synthesize_reports_error_after_tool_failure() {
        let evidence = SessionEvidence {
            created_issue_url: None,
            last_tool_failed: true,
        };
        let response = synthesize("Creating the issue failed: 422 invalid label.", &evidence);
        assert_eq!(response.status, TriageStatus::Error);
        assert!(response.issue_url.is_none());
    }

    #[test]
    fn synthesize_without_url_is_still_success() {
        let response = synthesize("Nothing to report.", &SessionEvidence::default());
        assert_eq!(response.status, TriageStatus::Success);
        assert!(response.issue_url.is_none());
    }
}
