//! Server entrypoint for issue-triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use triage_application::{ConversationLogger, RunTriageUseCase};
use triage_infrastructure::{
    ConfigLoader, FileConfig, GitHubIssueTracker, IssueToolExecutor, JsonSchemaToolConverter,
    JsonlConversationLogger, OpenAiLlmGateway,
};
use triage_presentation::{AppState, Cli, router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config_sources {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref())?;

    match ConfigLoader::load_dotenv() {
        Ok(Some(path)) => info!("Loaded environment from {}", path.display()),
        Ok(None) => warn!("No .env file found; using the process environment only"),
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    let config = load_config(&cli)?;
    config.validate().context("invalid configuration")?;

    info!("Starting issue-triage");

    // === Dependency Injection ===
    let repository = config.repository()?;
    info!(%repository, "Triaging into repository");

    let tracker = Arc::new(
        GitHubIssueTracker::new(
            repository.clone(),
            config.github_token()?,
            &config.github.api_base,
            Duration::from_secs(config.github.timeout_seconds),
        )
        .context("failed to create GitHub client")?,
    );

    let gateway = Arc::new(
        OpenAiLlmGateway::new(
            config.llm_api_key()?,
            &config.llm.base_url,
            config.llm.model.clone(),
            Duration::from_secs(config.llm.timeout_seconds),
        )
        .context("failed to create LLM gateway")?
        .with_temperature(config.llm.temperature),
    );

    let mut use_case = RunTriageUseCase::new(
        gateway,
        Arc::new(IssueToolExecutor::new(tracker)),
        Arc::new(JsonSchemaToolConverter),
        repository,
    )
    .with_execution_params(config.execution.to_execution_params());

    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Conversation log: {}", path.display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                use_case = use_case.with_conversation_logger(logger);
            }
            None => warn!(
                "Could not open conversation log {}; continuing without it",
                path.display()
            ),
        }
    }

    let state = AppState::new(Arc::new(use_case)).with_request_timeout(
        config
            .server
            .request_timeout_secs
            .map(Duration::from_secs),
    );
    let app = router(state, config.server.max_body_bytes);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(model = %config.llm.model, "Listening on http://{}/process_error", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")
}

/// Initialize logging based on verbosity level (`RUST_LOG` wins when set).
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "issue-triage.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to initialize logging")?;

    Ok(guard)
}

/// Filter directives for a `-v` count.
///
/// The quiet default still shows the per-session `info` lines of every
/// workspace crate.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,issue_triage=info,triage_application=info,triage_infrastructure=info,triage_presentation=info",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .context("failed to load configuration")?;

    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(turns) = cli.max_tool_turns {
        config.execution.max_tool_turns = turns;
    }

    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
