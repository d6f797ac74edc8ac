//! Transport-error classification.

use std::error::Error as _;

/// Returns true when a client error looks like a transient network-level
/// failure worth retrying.
///
/// The typed predicates cover connection setup and timeouts; the substring
/// check catches mid-stream failures (reset or abruptly closed connections)
/// that only surface through the error chain text. This function is the
/// single place the classification rule lives.
pub fn is_transient(err: &reqwest::Error) -> bool {
    if err.is_connect() || err.is_timeout() {
        return true;
    }

    let text = chain_text(err).to_ascii_lowercase();
    text.contains("network") || text.contains("connection reset") || text.contains("connection closed")
}

/// Flattens an error and its sources into one string for logging and for
/// the `details` field of the failure envelope.
pub fn chain_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
