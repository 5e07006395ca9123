//! Presentation layer for issue-triage
//!
//! This crate contains the HTTP boundary (`POST /process_error`) and the
//! CLI definitions of the server binary.

pub mod cli;
pub mod server;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use server::{ApiError, AppState, router};
