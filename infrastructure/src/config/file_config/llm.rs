//! Reasoning-engine configuration from TOML (`[llm]` section)

use crate::providers::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat-completions settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// API key (not recommended in files, use the env var). Legacy env: `OPENAI_API_KEY`.
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Base URL of the chat-completions API (can be overridden for compatible servers).
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 120,
            temperature: None,
        }
    }
}
