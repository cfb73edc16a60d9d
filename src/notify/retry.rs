// Retry policy with exponential backoff for outbound calls.
//
// Only transient failures are retried: connection problems, timeouts, 429
// and 5xx responses. Anything else (a 4xx from the receiver, a payload that
// would not serialize) comes back on the first attempt.

use std::time::Duration;

use anyhow::Result;
use tracing::warn;

/// An HTTP response with a non-success status.
#[derive(Debug)]
pub struct HttpStatusError {
    pub status: u16,
    pub body: String,
}

impl std::fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.body)
    }
}

impl std::error::Error for HttpStatusError {}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first (at least 1)
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub base_backoff: Duration,
    /// Upper bound on any single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Un-jittered delay before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}

/// Whether an error is worth another attempt.
pub fn is_transient(err: &anyhow::Error) -> bool {
    if let Some(status) = err.downcast_ref::<HttpStatusError>() {
        return status.status == 429 || status.status >= 500;
    }
    if let Some(req) = err.downcast_ref::<reqwest::Error>() {
        return req.is_timeout() || req.is_connect() || req.is_request();
    }
    false
}

/// Run `operation` under `policy`, retrying transient failures.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient(&err) || attempt >= max_attempts {
                    return Err(err);
                }

                let backoff = policy.backoff(attempt);

                // +/- 25% jitter from the clock's nanoseconds so concurrent
                // jobs don't retry in lockstep
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .subsec_nanos();
                let jitter_factor = 0.75 + (nanos % 500) as f64 / 1000.0;
                let jittered = Duration::from_secs_f64(backoff.as_secs_f64() * jitter_factor);

                warn!(
                    attempt,
                    max_attempts,
                    backoff_secs = jittered.as_secs_f64(),
                    error = %err,
                    "Transient failure, retrying"
                );

                tokio::time::sleep(jittered).await;
                attempt += 1;
            }
        }
    }
}
