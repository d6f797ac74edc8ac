//! The retrying proxy forwarder endpoint.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use relay_core::forward::{ForwardError, ProxyRequest};

use super::ErrorBody;
use crate::state::AppState;

/// POST /api/proxy
///
/// Successful responses are normalized to 200 regardless of the upstream
/// status; terminal failures of any kind come back as a 500 JSON envelope.
/// The raw body is deserialized by hand so a malformed payload lands in the
/// same envelope as every other failure instead of an extractor rejection.
pub async fn forward_request(State(state): State<AppState>, body: String) -> Response {
    let request: ProxyRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            error!("Malformed proxy request body: {}", err);
            return failure(ErrorBody::with_details("Invalid proxy request body", err.to_string()));
        }
    };

    match state.forwarder.forward(&request).await {
        Ok(response) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, response.content_type)], response.body)
                .into_response()
        }
        Err(err) => {
            error!("Proxy request failed: {}", err);
            failure(envelope_for(err))
        }
    }
}

fn envelope_for(err: ForwardError) -> ErrorBody {
    match err {
        ForwardError::Network { message, details } => ErrorBody::with_details(message, details),
        other => ErrorBody::new(other.to_string()),
    }
}

fn failure(body: ErrorBody) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
