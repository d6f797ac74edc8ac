//! API Routes
//!
//! JSON endpoints consumed by the dashboard client.

pub mod proxy;
pub mod search;
pub mod summary;

#[cfg(test)]
mod summary_tests;

use axum::{routing::post, Router};
use serde::Serialize;

use crate::state::AppState;

/// Failure envelope shared by every endpoint: a message plus optional
/// diagnostic detail. Callers always receive well-formed JSON, never a raw
/// transport fault.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), details: None }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self { error: error.into(), details: Some(details.into()) }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/proxy", post(proxy::forward_request))
        .route("/search", post(search::run_search))
        .route("/summary", post(summary::generate_summary))
}
