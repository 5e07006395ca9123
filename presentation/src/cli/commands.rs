//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for issue-triage
#[derive(Parser, Debug)]
#[command(name = "issue-triage")]
#[command(author, version, about = "Triage error logs into GitHub issues with an LLM agent")]
#[command(long_about = r#"
issue-triage serves POST /process_error. Each request hands the error log to a
reasoning engine that searches the configured repository for a matching issue
and creates one when nothing matches.

Configuration is loaded from (in priority order):
1. OPENAI_API_KEY, GITHUB_TOKEN, GITHUB_OWNER, GITHUB_REPO
2. TRIAGE_* environment variables (TRIAGE_SERVER__BIND, TRIAGE_LLM__MODEL, ...)
3. --config <path>     Explicit config file
4. ./triage.toml       Project-level config
5. ~/.config/issue-triage/config.toml   Global config

Example:
  issue-triage --bind 127.0.0.1:8000 -v
  curl -X POST localhost:8000/process_error -d '{"error_log": "panic: nil pointer"}'
"#)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment still applies)
    #[arg(long)]
    pub no_config: bool,

    /// Listen address (overrides server.bind)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Model to reason with (overrides llm.model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Tool-requesting steps allowed per session (overrides execution.max_tool_turns)
    #[arg(long, value_name = "N")]
    pub max_tool_turns: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config_sources: bool,
}
