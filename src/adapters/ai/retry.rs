//! Bounded retry for provider requests.
//!
//! Only request timeouts are repeated. Every other failure is returned on
//! the first attempt, and exhausting the attempts returns the last timeout.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::ports::AIError;

/// Fixed-delay retry policy for timeout-class failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never below 1.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy; `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Runs `operation` until it succeeds, fails with a non-timeout error, or
    /// the attempts are used up.
    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> Result<T, AIError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AIError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_timeout() && attempt < attempts => {
                    tracing::warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts = attempts,
                        error = %err,
                        "Provider request timed out, retrying"
                    );
                    sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_timeout() {
                        tracing::error!(
                            operation = operation_name,
                            attempts,
                            "Provider request timed out on every attempt"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}
