//! GitHub configuration from TOML (`[github]` section)

use crate::github::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};

/// Target repository and credentials for the issue tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGitHubConfig {
    /// Repository owner (user or organization). Legacy env: `GITHUB_OWNER`.
    pub owner: Option<String>,
    /// Repository name. Legacy env: `GITHUB_REPO`.
    pub repo: Option<String>,
    /// Personal access token (not recommended in files, use the env var). Legacy env: `GITHUB_TOKEN`.
    pub token: Option<String>,
    /// REST API base URL (GitHub Enterprise: `https://<host>/api/v3`).
    pub api_base: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for FileGitHubConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: 30,
        }
    }
}
