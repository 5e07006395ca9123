//! Routes and handlers for the triage endpoint

use super::error::ApiError;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use triage_application::RunTriageUseCase;
use triage_domain::{TriageRequest, TriageResponse};

/// Shared handler state. Cloned per request; the use case itself is shared.
#[derive(Clone)]
pub struct AppState {
    use_case: Arc<RunTriageUseCase>,
    request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(use_case: Arc<RunTriageUseCase>) -> Self {
        Self {
            use_case,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Build the HTTP router.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/process_error", post(process_error))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// `POST /process_error`
///
/// The body is parsed by hand so a malformed payload gets the same plain-text
/// `400` as an empty log. The session runs on its own task; if this handler
/// is dropped (client gone) or times out, the drop guard cancels it.
async fn process_error(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TriageResponse>, ApiError> {
    let request: TriageRequest = serde_json::from_slice(&body)?;
    request
        .validate()
        .map_err(|e| ApiError::from(triage_application::RunTriageError::from(e)))?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let use_case = state.use_case.clone();
    let session = tokio::spawn(async move { use_case.execute(request, cancel).await });

    let joined = match state.request_timeout {
        Some(limit) => tokio::time::timeout(limit, session)
            .await
            .map_err(|_| ApiError::Timeout(limit))?,
        None => session.await,
    };
    let outcome = joined??;

    let response = outcome.response();
    info!(
        run_id = %outcome.run_id,
        status = %response.status,
        issue_url = response.issue_url.as_deref().unwrap_or("-"),
        tool_turns = outcome.tool_turns,
        "Triage completed"
    );
    Ok(Json(response))
}
