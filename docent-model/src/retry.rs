//! Injectable retry policy for generation calls.

use std::time::Duration;

/// How [`ChatClient`](crate::ChatClient) behaves when a call fails with a
/// retryable error (rate limiting or a transient transport failure).
///
/// The default is [`RetryPolicy::none()`]: every failure is surfaced to the
/// caller immediately. Callers that want retries opt in with an explicit
/// policy, which keeps the behavior visible at the construction site and
/// pinnable in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per subsequent attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// No retries: the first failure is the final answer.
    pub fn none() -> Self {
        Self { max_retries: 0, base_delay: Duration::from_secs(1) }
    }

    /// Retry up to `max_retries` times with exponential backoff starting
    /// at `base_delay`.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self { max_retries, base_delay }
    }

    /// Backoff before retry number `attempt` (zero-based): `base_delay`
    /// doubled `attempt` times, saturating instead of overflowing.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(31))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
