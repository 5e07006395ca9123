//! HTTP error mapping for the request boundary
//!
//! Every error body is plain text. Caller mistakes are `400`; anything that
//! goes wrong inside the session is `500`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};
use triage_application::RunTriageError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(RunTriageError),

    #[error("Agent failed to process error: {0}")]
    Failed(RunTriageError),

    #[error("Agent failed to process error: no answer within {0:?}")]
    Timeout(Duration),

    #[error("Agent failed to process error: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

impl From<RunTriageError> for ApiError {
    fn from(e: RunTriageError) -> Self {
        if e.is_client_error() {
            ApiError::Rejected(e)
        } else {
            ApiError::Failed(e)
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Failed(_) | ApiError::Timeout(_) | ApiError::Aborted(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }
        (status, self.to_string()).into_response()
    }
}
