//! Content search against the external provider, with TLDR enrichment.
//!
//! The provider's response schema is treated as open: results are handled
//! as JSON values so unknown fields survive the round trip, and only the
//! fields the summarizer needs (`title`, `text`, `url`) are inspected.

pub mod summary;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info};

const BODY_SNIPPET_LEN: usize = 200;

/// Provider connection settings. `base_url` is overridable for tests.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub base_url: String,
    pub num_results: u32,
}

impl SearchConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.exa.ai".to_string(),
            num_results: 10,
        }
    }
}

/// Terminal failure of a search call.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provider answered with an error status; carries the extracted
    /// message. The handler passes the status through.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// The provider returned 2xx with a non-JSON content type.
    #[error("Expected JSON response but got {0}")]
    NotJson(String),

    /// The provider declared JSON but the body does not parse.
    #[error("Invalid JSON response from API")]
    InvalidPayload,

    /// Transport-level failure talking to the provider.
    #[error("Failed to complete search request")]
    Network(#[source] reqwest::Error),
}

impl SearchError {
    /// HTTP status the handler reports for this failure.
    pub fn status(&self) -> u16 {
        match self {
            Self::Provider { status, .. } => *status,
            Self::NotJson(_) | Self::InvalidPayload | Self::Network(_) => 500,
        }
    }

    /// Optional diagnostic detail for the failure envelope.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Network(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

/// Client for the provider's `/search` endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(client: Client, config: SearchConfig) -> Self {
        Self { client, config }
    }

    /// Runs a provider search and enriches each result with a `tldr`
    /// summary. A result the summarizer cannot handle (missing title or
    /// text) is returned un-enriched; enrichment never fails the search.
    pub async fn search(&self, query: &str) -> Result<Value, SearchError> {
        info!("Search request: {}", query);

        let url = format!("{}/search", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .json(&json!({
                "query": query,
                "numResults": self.config.num_results,
                "useAutoprompt": true,
                "text": true,
                "highlights": true,
            }))
            .send()
            .await
            .map_err(SearchError::Network)?;

        let status = response.status();
        debug!("Provider status: {}", status);
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !status.is_success() {
            let message = provider_error_message(status, &content_type, response).await;
            return Err(SearchError::Provider { status: status.as_u16(), message });
        }

        if !content_type.contains("application/json") {
            return Err(SearchError::NotJson(content_type));
        }

        let body = response.text().await.map_err(SearchError::Network)?;
        let mut data: Value = serde_json::from_str(&body).map_err(|err| {
            error!("Invalid JSON from provider: {}", err);
            SearchError::InvalidPayload
        })?;

        if let Some(results) = data.get_mut("results").and_then(Value::as_array_mut) {
            for result in results {
                enrich_with_tldr(result);
            }
        }

        Ok(data)
    }
}

/// Attaches a `tldr` field generated from the result's title and URL.
/// Results without a title or text are left untouched.
fn enrich_with_tldr(result: &mut Value) {
    let title = result.get("title").and_then(Value::as_str).unwrap_or_default();
    let text = result.get("text").and_then(Value::as_str).unwrap_or_default();
    let url = result.get("url").and_then(Value::as_str).unwrap_or_default();

    if title.is_empty() || text.is_empty() {
        debug!("Skipping TLDR for result without title/text");
        return;
    }

    let tldr = summary::generate(title, summary::SourceType::from_url(url));
    if let Some(obj) = result.as_object_mut() {
        obj.insert("tldr".to_string(), Value::String(tldr));
    }
}

/// Provider error extraction: top-level `error` or `message` string for
/// JSON bodies, a bounded snippet otherwise. Parse failures are swallowed.
async fn provider_error_message(
    status: StatusCode,
    content_type: &str,
    response: reqwest::Response,
) -> String {
    let generic = format!("API returned status {}", status.as_u16());
    let Ok(body) = response.text().await else {
        return generic;
    };

    if content_type.contains("application/json") {
        serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(Value::as_str)
                    .or_else(|| value.get("message").and_then(Value::as_str))
                    .map(str::to_string)
            })
            .unwrap_or(generic)
    } else if body.is_empty() {
        generic
    } else {
        let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
        format!("{}: {}", generic, snippet)
    }
}
