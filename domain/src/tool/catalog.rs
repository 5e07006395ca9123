//! Declarative contracts of the triage tools.
//!
//! Only the schemas live here; the executors that bind them to the issue
//! tracker are infrastructure adapters.

use super::entities::{ParamType, RiskLevel, ToolDefinition, ToolParameter, ToolSpec};

pub const SEARCH_ISSUES: &str = "search_issues";
pub const CREATE_ISSUE: &str = "create_issue";

/// Labels `create_issue` accepts. Anything else is dropped.
pub const ALLOWED_LABELS: [&str; 3] = ["bug", "llm created", "enhancement"];

/// Labels the instruction asks the engine to apply to every new issue.
pub const REQUIRED_LABELS: [&str; 2] = ["bug", "llm created"];

pub fn search_issues_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_ISSUES,
        "Searches for existing issues in the repository based on a query. \
         Returns a list of issue titles and URLs if found, otherwise indicates no issues found.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "query",
        "The search query for issues, e.g., 'bug in login module' or 'database connection error'.",
        true,
    ))
}

pub fn create_issue_definition() -> ToolDefinition {
    ToolDefinition::new(
        CREATE_ISSUE,
        "Creates a new issue in the repository. Provide a title, detailed body, and labels.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "title",
        "The title of the new issue (e.g., 'Bug: Login failure on homepage').",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "body",
        "The detailed description for the issue, including stack traces or context.",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "labels",
            "An array of labels to apply to the issue, e.g., ['bug', 'llm created'].",
            false,
        )
        .with_type(ParamType::Array)
        .with_allowed_values(ALLOWED_LABELS),
    )
}

/// The registered triage tools, plus aliases for their older GitHub-specific names.
pub fn triage_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(search_issues_definition())
        .register(create_issue_definition())
        .register_aliases([
            ("search_github_issues", SEARCH_ISSUES),
            ("create_github_issue", CREATE_ISSUE),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_registers_both_tools() {
        let spec = triage_tool_spec();
        assert_eq!(spec.len(), 2);
        assert!(!spec.get(SEARCH_ISSUES).unwrap().has_side_effects());
        assert!(spec.get(CREATE_ISSUE).unwrap().has_side_effects());
        assert_eq!(spec.resolve("create_github_issue"), Some(CREATE_ISSUE));
    }

    #[test]
    fn create_issue_parameters_are_ordered() {
        let def = create_issue_definition();
        let names: Vec<&str> = def.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["title", "body", "labels"]);

        let labels = def.parameter("labels").unwrap();
        assert!(!labels.required);
        assert_eq!(labels.param_type, ParamType::Array);
        assert!(labels.allows("llm created"));
        assert!(!labels.allows("wontfix"));
    }

    #[test]
    fn required_labels_are_allowed() {
        for label in REQUIRED_LABELS {
            assert!(ALLOWED_LABELS.contains(&label));
        }
    }
}
