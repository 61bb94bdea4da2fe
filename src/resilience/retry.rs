use crate::constants::system;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded exponential backoff policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each further attempt
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay to wait after the given 1-based attempt failed
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        // Exponent is capped so a misconfigured policy cannot overflow
        let exponent = (attempt.saturating_sub(1)).min(16);
        self.base_delay * (1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: system::DEFAULT_MATCH_ATTEMPTS,
            base_delay: Duration::from_millis(system::DEFAULT_MATCH_BACKOFF_MS),
        }
    }
}

/// Run an operation with bounded retries on transient failures.
///
/// `is_retriable` decides which errors are worth another attempt; anything
/// else, and the final attempt's error, surface unchanged.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
    mut is_retriable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: FnMut(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts && is_retriable(&error) => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    operation = operation_name,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
