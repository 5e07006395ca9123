//! GitHub REST adapter for [`IssueTrackerPort`].
//!
//! ```text
//! search → GET  {api_base}/search/issues?q=<query> is:issue in:title,body repo:<owner>/<name>
//! create → POST {api_base}/repos/<owner>/<name>/issues  {title, body, labels}
//! ```
//!
//! One `reqwest::Client` is built up front with the authentication and API
//! version headers, then shared by every request. Failures are returned once;
//! there are no automatic retries.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use triage_application::ports::issue_tracker::{IssueTrackerPort, TrackerError};
use triage_domain::util::truncate_str;
use triage_domain::{IssueSummary, NewIssue, RepositoryRef};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const ERROR_BODY_LIMIT: usize = 800;

/// Issue tracker backed by the GitHub REST API.
pub struct GitHubIssueTracker {
    http: reqwest::Client,
    api_base: String,
    repository: RepositoryRef,
}

impl GitHubIssueTracker {
    /// Build the client. Fails only if the token cannot be used as a header value.
    pub fn new(
        repository: RepositoryRef,
        token: &str,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, TrackerError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("issue-triage/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|e| TrackerError::Transport(format!("invalid GitHub token: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            repository,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/issues", self.api_base)
    }

    fn create_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_base, self.repository.owner, self.repository.name
        )
    }
}

/// Search qualifier scoping a free-text query to issues of one repository.
pub(crate) fn search_query(query: &str, repository: &RepositoryRef) -> String {
    format!("{} is:issue in:title,body repo:{}", query, repository)
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<IssueItem>,
}

#[derive(Debug, Deserialize)]
struct IssueItem {
    title: String,
    html_url: String,
    #[serde(default)]
    number: Option<u64>,
}

impl From<IssueItem> for IssueSummary {
    fn from(item: IssueItem) -> Self {
        IssueSummary::new(item.title, item.html_url)
    }
}

#[derive(Debug, Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [String],
}

/// Map a non-success status and body to a [`TrackerError`].
pub(crate) fn status_error(status: StatusCode, body: &str) -> TrackerError {
    let message = extract_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TrackerError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        _ => TrackerError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

/// GitHub error bodies are `{"message": ..., "errors": [...]}`; fall back to the raw text.
fn extract_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| {
            let details = parsed
                .as_ref()
                .and_then(|v| v.get("errors"))
                .filter(|e| e.as_array().is_some_and(|a| !a.is_empty()))
                .map(|e| format!(" {}", e))
                .unwrap_or_default();
            format!("{}{}", m, details)
        })
        .unwrap_or_else(|| body.trim().to_string());
    truncate_str(&message, ERROR_BODY_LIMIT).to_string()
}

fn transport_error(e: reqwest::Error) -> TrackerError {
    if e.is_timeout() {
        TrackerError::Transport(format!("request timed out: {}", e))
    } else {
        TrackerError::Transport(e.to_string())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TrackerError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| TrackerError::Decode(e.to_string()))
}

#[async_trait]
impl IssueTrackerPort for GitHubIssueTracker {
    fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    async fn search(&self, query: &str) -> Result<Vec<IssueSummary>, TrackerError> {
        let q = search_query(query, &self.repository);
        debug!("GitHub search: {}", q);

        let result = async {
            let response = self
                .http
                .get(self.search_url())
                .query(&[("q", q.as_str())])
                .send()
                .await
                .map_err(transport_error)?;
            read_json::<SearchResponse>(response).await
        }
        .await;

        match result {
            Ok(found) => {
                info!(query, matches = found.items.len(), "GitHub search completed");
                Ok(found.items.into_iter().map(IssueSummary::from).collect())
            }
            Err(e) => {
                warn!(query, error = %e, "GitHub search failed");
                Err(e)
            }
        }
    }

    async fn create(&self, issue: &NewIssue) -> Result<IssueSummary, TrackerError> {
        let payload = CreateIssueRequest {
            title: &issue.title,
            body: &issue.body,
            labels: &issue.labels,
        };

        let result = async {
            let response = self
                .http
                .post(self.create_url())
                .json(&payload)
                .send()
                .await
                .map_err(transport_error)?;
            read_json::<IssueItem>(response).await
        }
        .await;

        match result {
            Ok(created) => {
                info!(
                    title = %issue.title,
                    number = ?created.number,
                    url = %created.html_url,
                    "GitHub issue created"
                );
                Ok(created.into())
            }
            Err(e) => {
                warn!(title = %issue.title, error = %e, "GitHub issue creation failed");
                Err(e)
            }
        }
    }
}
