//! Tool implementations for the triage session
//!
//! - [`IssueToolExecutor`]: runs `search_issues` / `create_issue` against an
//!   issue tracker
//! - [`JsonSchemaToolConverter`]: renders tool contracts as JSON Schema for
//!   the reasoning engine

pub mod issues;

mod executor;
mod schema;

pub use executor::IssueToolExecutor;
pub use schema::JsonSchemaToolConverter;
