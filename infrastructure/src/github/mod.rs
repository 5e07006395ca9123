//! GitHub issue tracker adapter.

mod tracker;

pub use tracker::{DEFAULT_API_BASE, GitHubIssueTracker};
