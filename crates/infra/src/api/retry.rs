//! Bounded retry on authorization rejection
//!
//! Only [`GttxError::is_retryable`] failures are retried, which in practice
//! means an authenticated call that came back with code 4. Every other
//! failure surfaces on the attempt that produced it.

use std::future::Future;

use gttx_domain::{GttxError, Result};
use tracing::{debug, warn};

/// Retry budget for authenticated calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self::default()
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total attempts this policy allows
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether a failure on attempt number `attempt` (1-based) gets another go
    pub fn should_retry(&self, error: &GttxError, attempt: u32) -> bool {
        error.is_retryable() && attempt < self.max_attempts()
    }

    /// Run `operation` until it succeeds, fails terminally or the budget is
    /// spent.
    ///
    /// The closure receives the 1-based attempt number. When retries run out
    /// the last observed failure is returned.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if self.should_retry(&err, attempt) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts(),
                        kind = err.label(),
                        code = err.code(),
                        error = %err,
                        "authorization rejected; retrying"
                    );
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_retryable() {
                        warn!(
                            attempt,
                            kind = err.label(),
                            error = %err,
                            "authorization retries exhausted"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn expired() -> GttxError {
        GttxError::AuthorizationExpired { code: 4, message: "expired".into() }
    }

    #[tokio::test]
    async fn retries_code_four_until_budget_is_spent() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(2);

        let result: Result<()> = policy
            .execute(|_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(expired())
            })
            .await;

        assert_eq!(result.unwrap_err(), expired());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn other_codes_fail_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5);

        let result: Result<()> = policy
            .execute(|_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(GttxError::ProviderRejected { code: 7, message: "bad ip".into() })
            })
            .await;

        assert!(matches!(result, Err(GttxError::ProviderRejected { code: 7, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn default_policy_makes_a_single_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<()> = RetryPolicy::none()
            .execute(|_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(expired())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn succeeds_after_one_rejection() {
        let policy = RetryPolicy::new(1);

        let value = policy
            .execute(|attempt| async move {
                if attempt == 1 {
                    Err(expired())
                } else {
                    Ok(attempt)
                }
            })
            .await
            .unwrap();

        assert_eq!(value, 2);
    }

    #[test]
    fn should_retry_respects_attempt_count() {
        let policy = RetryPolicy::new(1);
        assert!(policy.should_retry(&expired(), 1));
        assert!(!policy.should_retry(&expired(), 2));
        assert!(!policy.should_retry(&GttxError::Transport("reset".into()), 1));
    }
}
