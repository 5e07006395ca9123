//! Issue-tracker domain: repository identity and issue payloads.

pub mod entities;

pub use entities::{IssueSummary, NewIssue, RepositoryRef};
