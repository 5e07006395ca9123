//! HTTP boundary: `POST /process_error`

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};
