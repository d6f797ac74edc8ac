//! Templated TLDR summaries as a standalone endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use relay_core::search::summary::{self, SourceType};

use super::ErrorBody;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// POST /api/summary
pub async fn generate_summary(Json(body): Json<SummaryBody>) -> Response {
    if body.title.is_empty() || body.content.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(ErrorBody::new("Title and content are required")))
            .into_response();
    }

    let source =
        body.source_type.as_deref().map(SourceType::parse).unwrap_or(SourceType::Web);
    let summary = summary::generate(&body.title, source);

    Json(SummaryResponse { summary }).into_response()
}
