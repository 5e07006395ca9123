//! Configuration loading for issue-triage
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OPENAI_API_KEY`, `GITHUB_TOKEN`, `GITHUB_OWNER`, `GITHUB_REPO`
//! 2. `TRIAGE_*` environment variables
//! 3. `--config <path>` specified file
//! 4. Project root: `./triage.toml` or `./.triage.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/issue-triage/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileExecutionConfig, FileGitHubConfig, FileLlmConfig,
    FileLoggingConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
