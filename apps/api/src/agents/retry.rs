// Retry with exponential backoff
//
// Used around model-client initialization at startup. Agents themselves
// never retry.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Backoff settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first
    pub max_retries: u32,
    pub initial_wait: Duration,
    pub exponential_base: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_wait: Duration::from_secs(1),
            exponential_base: 2,
        }
    }
}

impl RetryPolicy {
    /// Wait before the attempt following `attempt` (0-based)
    pub fn wait_after(&self, attempt: u32) -> Duration {
        self.initial_wait
            .saturating_mul(self.exponential_base.saturating_pow(attempt))
    }
}

/// Runs `operation` until it succeeds or the policy's attempts run out
///
/// Returns the error of the final attempt.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.max_retries.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt + 1 >= attempts => {
                tracing::error!(
                    operation = label,
                    attempts,
                    error = %err,
                    "Giving up after final attempt"
                );
                return Err(err);
            }
            Err(err) => {
                let wait = policy.wait_after(attempt);
                tracing::warn!(
                    operation = label,
                    error = %err,
                    "Attempt {} failed. Retrying in {:?}...",
                    attempt + 1,
                    wait
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_wait: Duration::from_millis(1),
            exponential_base: 2,
        }
    }

    #[test]
    fn wait_grows_exponentially() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.wait_after(0), Duration::from_secs(1));
        assert_eq!(policy.wait_after(1), Duration::from_secs(2));
        assert_eq!(policy.wait_after(2), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result: Result<&str, String> = retry_with_backoff(&fast_policy(3), "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(format!("failure {}", n))
                } else {
                    Ok("ready")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ready");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = retry_with_backoff(&fast_policy(3), "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(format!("failure {}", n)) }
        })
        .await;

        assert_eq!(result.unwrap_err(), "failure 2");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_retries_still_tries_once() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = retry_with_backoff(&fast_policy(0), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("nope".to_string()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
