//! Triage request and response entities (the externally observable contract).

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Incoming request: the free-text description of a failure.
///
/// The log may be of any length and contain any characters; it is never
/// sliced or truncated before it reaches the reasoning engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRequest {
    pub error_log: String,
}

impl TriageRequest {
    pub fn new(error_log: impl Into<String>) -> Self {
        Self {
            error_log: error_log.into(),
        }
    }

    /// A log consisting only of whitespace counts as empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.error_log.trim().is_empty() {
            return Err(DomainError::EmptyErrorLog);
        }
        Ok(())
    }
}

/// Outcome classification of a completed triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageStatus {
    Success,
    Error,
}

impl TriageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TriageStatus::Success => "success",
            TriageStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for TriageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured result returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResponse {
    pub status: TriageStatus,
    /// The engine's final answer, verbatim
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
}
