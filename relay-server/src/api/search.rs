//! Provider search with TLDR enrichment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use super::ErrorBody;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub query: String,
}

/// POST /api/search
///
/// Like the proxy endpoint, the raw body is deserialized by hand so a
/// malformed payload comes back as the failure envelope instead of an
/// extractor rejection.
pub async fn run_search(State(state): State<AppState>, body: String) -> Response {
    let body: SearchBody = match serde_json::from_str(&body) {
        Ok(body) => body,
        Err(err) => {
            error!("Malformed search request body: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_details("Failed to complete search request", err.to_string())),
            )
                .into_response();
        }
    };

    if body.query.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(ErrorBody::new("Search query is required")))
            .into_response();
    }

    match state.search.search(&body.query).await {
        Ok(data) => Json(data).into_response(),
        Err(err) => {
            error!("Search failed: {}", err);
            let status = StatusCode::from_u16(err.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let envelope = match err.details() {
                Some(details) => ErrorBody::with_details(err.to_string(), details),
                None => ErrorBody::new(err.to_string()),
            };
            (status, Json(envelope)).into_response()
        }
    }
}
