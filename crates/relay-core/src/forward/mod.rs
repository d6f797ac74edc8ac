//! Retrying proxy forwarder.
//!
//! Relays a caller-described HTTP request to an arbitrary origin, retrying
//! transient failures (transport errors and selected statuses) with
//! exponential backoff. Transport retries and status retries share a single
//! budget, so a mixed sequence of failures still stops after
//! [`policy::MAX_RETRIES`] retries total.

mod error_extraction;
pub mod policy;
pub mod transport;

pub use policy::RetryPolicy;

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A caller-described outbound request, deserialized from the inbound
/// `/api/proxy` body.
///
/// The required fields default to empty strings so that a missing field is
/// reported by [`Forwarder::forward`] as [`ForwardError::InvalidRequest`]
/// instead of an extractor-level rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// The origin's body and content type after normalization. The HTTP status
/// is always reported to the caller as 200, whatever the origin returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardResponse {
    pub content_type: String,
    pub body: String,
}

/// Terminal failure of a forward call. Every variant is recovered at the
/// handler boundary and converted into the JSON failure envelope.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Fatal input error. Never retried, no network call attempted.
    #[error("{0}")]
    InvalidRequest(&'static str),

    /// Transport-level failure that survived the retry budget (or was not
    /// classified as transient in the first place).
    #[error("{message}")]
    Network { message: String, details: String },

    /// The origin answered with an error status. Retryable statuses have
    /// exhausted the budget by the time this surfaces.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The origin declared JSON but the body does not parse.
    #[error("Invalid JSON response from API")]
    InvalidUpstreamPayload,
}

/// Outcome of a single attempt: either the loop is done, or the failure is
/// transient and worth another attempt if budget remains.
enum AttemptOutcome {
    Done(Result<ForwardResponse, ForwardError>),
    TransientStatus { status: StatusCode, message: String },
    TransientTransport(reqwest::Error),
}

/// Executes [`ProxyRequest`]s against arbitrary origins with a bounded
/// retry loop. Cheap to clone; the inner client shares its pool.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    policy: RetryPolicy,
}

impl Forwarder {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Forwards the request, retrying transient failures with exponential
    /// backoff. Returns the normalized origin response or a terminal error.
    pub async fn forward(&self, request: &ProxyRequest) -> Result<ForwardResponse, ForwardError> {
        if request.protocol.is_empty() || request.origin.is_empty() || request.path.is_empty() {
            return Err(ForwardError::InvalidRequest("Missing required proxy parameters"));
        }

        let url = format!("{}://{}{}", request.protocol, request.origin, request.path);
        let method = match &request.method {
            Some(m) => Method::from_bytes(m.as_bytes())
                .map_err(|_| ForwardError::InvalidRequest("Invalid HTTP method"))?,
            None => Method::POST,
        };
        let headers = build_headers(&request.headers);

        // Retries consumed so far. One budget shared by both failure classes.
        let mut attempts_used: u32 = 0;

        loop {
            debug!("[Attempt {}] Forwarding {} {}", attempts_used + 1, method, url);

            let outcome = self.attempt(&method, &url, &headers, request.body.as_deref()).await;

            let (reason, terminal) = match outcome {
                AttemptOutcome::Done(result) => return result,
                AttemptOutcome::TransientStatus { status, message } => (
                    format!("upstream status {}", status),
                    ForwardError::Upstream { status: status.as_u16(), message },
                ),
                AttemptOutcome::TransientTransport(err) => (
                    format!("transport error: {}", err),
                    ForwardError::Network {
                        message: format!("Request to {} failed: {}", url, err),
                        details: transport::chain_text(&err),
                    },
                ),
            };

            if attempts_used >= self.policy.max_retries {
                warn!("Retry budget exhausted after {}: giving up", reason);
                return Err(terminal);
            }

            attempts_used += 1;
            let delay = self.policy.delay(attempts_used);
            info!(
                "Transient failure ({}), retry {}/{} in {}ms",
                reason,
                attempts_used,
                self.policy.max_retries,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<&str>,
    ) -> AttemptOutcome {
        let mut outbound = self.client.request(method.clone(), url).headers(headers.clone());
        if let Some(body) = body {
            outbound = outbound.body(body.to_string());
        }

        let response = match outbound.send().await {
            Ok(response) => response,
            Err(err) => {
                return if transport::is_transient(&err) {
                    AttemptOutcome::TransientTransport(err)
                } else {
                    AttemptOutcome::Done(Err(ForwardError::Network {
                        message: format!("Request to {} failed: {}", url, err),
                        details: transport::chain_text(&err),
                    }))
                };
            }
        };

        let status = response.status();
        debug!("Upstream status: {}", status);

        if !status.is_success() {
            let message = error_extraction::upstream_message(response).await;
            return if policy::is_retryable_status(status) {
                AttemptOutcome::TransientStatus { status, message }
            } else {
                AttemptOutcome::Done(Err(ForwardError::Upstream {
                    status: status.as_u16(),
                    message,
                }))
            };
        }

        let content_type = content_type_of(&response);
        match response.text().await {
            Ok(body) => AttemptOutcome::Done(normalize_success(content_type, body)),
            Err(err) if transport::is_transient(&err) => AttemptOutcome::TransientTransport(err),
            Err(err) => AttemptOutcome::Done(Err(ForwardError::Network {
                message: format!("Failed to read response from {}: {}", url, err),
                details: transport::chain_text(&err),
            })),
        }
    }
}

/// Success normalization: JSON bodies are validated for well-formedness and
/// returned verbatim with the content type pinned to `application/json`;
/// everything else passes through untouched.
fn normalize_success(content_type: String, body: String) -> Result<ForwardResponse, ForwardError> {
    if content_type.contains("application/json") {
        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!("Upstream declared JSON but body does not parse");
            return Err(ForwardError::InvalidUpstreamPayload);
        }
        return Ok(ForwardResponse { content_type: "application/json".to_string(), body });
    }
    Ok(ForwardResponse { content_type, body })
}

/// Outbound headers: caller headers with `Accept` and `Content-Type` forced
/// to JSON (the caller cannot override those two). Invalid caller names or
/// values are skipped, matching fetch-style lenience.
fn build_headers(extra: &HashMap<String, String>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in extra {
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            if let Ok(value) = HeaderValue::from_str(value) {
                headers.insert(name, value);
            }
        }
    }
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn content_type_of(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
