//! Best-effort extraction of an error message from a failed upstream
//! response. Extraction failures are swallowed; the generic status message
//! always survives.

use tracing::debug;

const BODY_SNIPPET_LEN: usize = 200;

/// Reads the failed response's body and produces a human-readable message.
pub async fn upstream_message(response: reqwest::Response) -> String {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    match response.text().await {
        Ok(body) => message_from_parts(status, &content_type, &body),
        Err(err) => {
            debug!("Could not read upstream error body: {}", err);
            generic_message(status)
        }
    }
}

/// Pure part of the extraction: JSON bodies contribute `error.message` when
/// present, other bodies contribute a bounded snippet appended to the
/// generic message.
pub fn message_from_parts(status: u16, content_type: &str, body: &str) -> String {
    if content_type.contains("application/json") {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("error")?.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| generic_message(status))
    } else if body.is_empty() {
        generic_message(status)
    } else {
        let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
        format!("{}: {}", generic_message(status), snippet)
    }
}

fn generic_message(status: u16) -> String {
    format!("API returned status {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_message_wins() {
        let body = r#"{"error":{"message":"not found"}}"#;
        assert_eq!(message_from_parts(404, "application/json", body), "not found");
    }

    #[test]
    fn json_without_message_falls_back_to_generic() {
        let body = r#"{"error":"boom"}"#;
        assert_eq!(message_from_parts(500, "application/json", body), "API returned status 500");
    }

    #[test]
    fn malformed_json_is_swallowed() {
        assert_eq!(
            message_from_parts(502, "application/json; charset=utf-8", "<html>bad gateway</html>"),
            "API returned status 502"
        );
    }

    #[test]
    fn text_body_is_appended_truncated() {
        let body = "x".repeat(500);
        let message = message_from_parts(503, "text/html", &body);
        assert_eq!(message, format!("API returned status 503: {}", "x".repeat(200)));
    }

    #[test]
    fn empty_body_keeps_generic() {
        assert_eq!(message_from_parts(504, "", ""), "API returned status 504");
    }
}
