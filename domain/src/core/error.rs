//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Error log cannot be empty")]
    EmptyErrorLog,

    #[error("Invalid repository '{0}': expected owner/name")]
    InvalidRepository(String),
}

impl DomainError {
    /// Whether the error was caused by caller input (as opposed to configuration).
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::EmptyErrorLog)
    }
}
