//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Environment variables are merged into the same shape by the loader.

mod execution;
mod github;
mod llm;
mod logging;
mod server;

pub use execution::FileExecutionConfig;
pub use github::FileGitHubConfig;
pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use triage_domain::RepositoryRef;

/// Configuration validation errors
///
/// Any of these is fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{field} is not set (config file or {env})")]
    MissingValue {
        field: &'static str,
        env: &'static str,
    },

    #[error("{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("execution.max_tool_turns cannot be 0")]
    InvalidMaxToolTurns,

    #[error("server.max_body_bytes cannot be 0")]
    InvalidBodyLimit,

    #[error("server.bind '{0}' is not a socket address")]
    InvalidBind(String),

    #[error("invalid repository: {0}")]
    InvalidRepository(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Issue tracker target and credentials
    pub github: FileGitHubConfig,
    /// Reasoning engine
    pub llm: FileLlmConfig,
    /// HTTP boundary
    pub server: FileServerConfig,
    /// Session loop control
    pub execution: FileExecutionConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.github_token()?;
        self.llm_api_key()?;
        self.repository()?;

        if self.github.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "github.timeout_seconds",
            ));
        }
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("llm.timeout_seconds"));
        }
        if self.server.request_timeout_secs == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout(
                "server.request_timeout_secs",
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.execution.max_tool_turns == 0 {
            return Err(ConfigValidationError::InvalidMaxToolTurns);
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigValidationError::InvalidBodyLimit);
        }
        self.bind_addr()?;

        Ok(())
    }

    /// The repository every tracker call is scoped to.
    pub fn repository(&self) -> Result<RepositoryRef, ConfigValidationError> {
        let owner = non_blank(&self.github.owner).ok_or(ConfigValidationError::MissingValue {
            field: "github.owner",
            env: "GITHUB_OWNER",
        })?;
        let repo = non_blank(&self.github.repo).ok_or(ConfigValidationError::MissingValue {
            field: "github.repo",
            env: "GITHUB_REPO",
        })?;
        format!("{}/{}", owner, repo)
            .parse::<RepositoryRef>()
            .map_err(|e| ConfigValidationError::InvalidRepository(e.to_string()))
    }

    pub fn github_token(&self) -> Result<&str, ConfigValidationError> {
        non_blank(&self.github.token).ok_or(ConfigValidationError::MissingValue {
            field: "github.token",
            env: "GITHUB_TOKEN",
        })
    }

    pub fn llm_api_key(&self) -> Result<&str, ConfigValidationError> {
        non_blank(&self.llm.api_key).ok_or(ConfigValidationError::MissingValue {
            field: "llm.api_key",
            env: "OPENAI_API_KEY",
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigValidationError::InvalidBind(self.server.bind.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> FileConfig {
        toml::from_str(
            r#"
[github]
owner = "acme"
repo = "api"
token = "ghp_test"

[llm]
api_key = "sk-test"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[github]
owner = "acme"
repo = "api"
token = "ghp_test"
api_base = "https://github.example.com/api/v3"
timeout_seconds = 10

[llm]
api_key = "sk-test"
model = "gpt-4o"
base_url = "http://localhost:8080/v1"
temperature = 0.2

[server]
bind = "127.0.0.1:9000"
request_timeout_secs = 90
max_body_bytes = 65536

[execution]
max_tool_turns = 4

[logging]
conversation_log = "/var/log/triage/conversation.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.api_base, "https://github.example.com/api/v3");
        assert_eq!(config.github.timeout_seconds, 10);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.temperature, Some(0.2));
        assert_eq!(config.server.request_timeout_secs, Some(90));
        assert_eq!(config.server.max_body_bytes, 65536);
        assert_eq!(config.execution.to_execution_params().max_tool_turns, 4);
        assert!(config.logging.conversation_log.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.github.timeout_seconds, 30);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert_eq!(config.execution.max_tool_turns, 10);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = complete_config();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.repository().unwrap(), RepositoryRef::new("acme", "api"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_credentials() {
        let mut config = complete_config();
        config.github.token = Some("  ".to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MissingValue {
                field: "github.token",
                env: "GITHUB_TOKEN",
            })
        );

        let mut config = complete_config();
        config.llm.api_key = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        let mut config = complete_config();
        config.github.owner = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingValue { field: "github.owner", .. })
        ));
    }

    #[test]
    fn test_validate_zero_values() {
        let mut config = complete_config();
        config.llm.timeout_seconds = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout("llm.timeout_seconds"))
        );

        let mut config = complete_config();
        config.execution.max_tool_turns = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxToolTurns)
        );

        let mut config = complete_config();
        config.server.request_timeout_secs = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_validate_bad_repository_and_bind() {
        let mut config = complete_config();
        config.github.repo = Some("api/extra".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRepository(_))
        ));

        let mut config = complete_config();
        config.server.bind = "localhost".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidBind("localhost".to_string()))
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let mut config = complete_config();
        config.llm.model = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }
}
