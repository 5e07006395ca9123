//! Issue tracker port
//!
//! Search and create against one fixed repository. The tracker performs no
//! deduplication: `create` called twice files two issues.

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::{IssueSummary, NewIssue, RepositoryRef};

/// Failures talking to the issue tracker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("rejected by tracker (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("could not decode tracker response: {0}")]
    Decode(String),
}

/// Port for the external issue tracker
#[async_trait]
pub trait IssueTrackerPort: Send + Sync {
    /// The repository every call is scoped to
    fn repository(&self) -> &RepositoryRef;

    /// Search issues by title and body. No matches is `Ok(vec![])`.
    async fn search(&self, query: &str) -> Result<Vec<IssueSummary>, TrackerError>;

    /// Create an issue. Not idempotent.
    async fn create(&self, issue: &NewIssue) -> Result<IssueSummary, TrackerError>;
}
