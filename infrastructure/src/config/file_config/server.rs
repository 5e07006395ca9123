//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address
    pub bind: String,
    /// Upper bound on one request, session included (no limit when unset)
    pub request_timeout_secs: Option<u64>,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            request_timeout_secs: None,
            max_body_bytes: 1024 * 1024,
        }
    }
}
