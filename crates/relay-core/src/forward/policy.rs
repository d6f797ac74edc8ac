//! Retry budget and backoff schedule.

use reqwest::StatusCode;
use std::time::Duration;

/// Retries shared across transport errors and retryable statuses.
pub const MAX_RETRIES: u32 = 3;

/// Base delay for the exponential backoff schedule.
pub const BASE_DELAY_MS: u64 = 1000;

/// Bounded exponential backoff: one budget of [`MAX_RETRIES`] retries per
/// call, with the delay doubling before each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: MAX_RETRIES, base_delay: Duration::from_millis(BASE_DELAY_MS) }
    }
}

impl RetryPolicy {
    /// Delay inserted before retry `retry_number` (1-based):
    /// `base_delay * 2^retry_number`, so 2s, 4s, 8s with the defaults.
    pub fn delay(&self, retry_number: u32) -> Duration {
        self.base_delay * 2_u32.saturating_pow(retry_number)
    }
}

/// Statuses worth another attempt: rate limiting and transient upstream
/// failures. Everything else short-circuits to a terminal error.
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_per_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(1), Duration::from_millis(2000));
        assert_eq!(policy.delay(2), Duration::from_millis(4000));
        assert_eq!(policy.delay(3), Duration::from_millis(8000));
    }

    #[test]
    fn delay_scales_with_base() {
        let policy = RetryPolicy { max_retries: 3, base_delay: Duration::from_millis(10) };
        assert_eq!(policy.delay(1), Duration::from_millis(20));
        assert_eq!(policy.delay(3), Duration::from_millis(80));
    }

    #[test]
    fn retryable_statuses_match_contract() {
        for code in [429, 500, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(is_retryable_status(status), "{code} should be retryable");
        }
        for code in [200, 201, 400, 401, 403, 404, 501] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(!is_retryable_status(status), "{code} should not be retryable");
        }
    }

    // The schedule under tokio's paused clock: the sleep for retry k takes
    // exactly base * 2^k of virtual time.
    #[tokio::test(start_paused = true)]
    async fn backoff_waits_follow_schedule() {
        let policy = RetryPolicy::default();
        for (retry, expected_ms) in [(1, 2000), (2, 4000), (3, 8000)] {
            let start = tokio::time::Instant::now();
            tokio::time::sleep(policy.delay(retry)).await;
            assert_eq!(start.elapsed(), Duration::from_millis(expected_ms));
        }
    }
}
