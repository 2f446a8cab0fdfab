use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::backoff::{exponential_retry_delay, DelayFn};

/// Number of retries after the first attempt when nothing else is configured.
pub const DEFAULT_BACKOFF_MAX_TRIES: u32 = 5;

/// Retry configuration for outbound requests.
///
/// Immutable once built; clones share the same delay function.
#[derive(Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Arc<DelayFn>,
}

impl RetryPolicy {
    /// `max_retries` retries after the first attempt, waiting `delay(retry)` before each.
    pub fn new(max_retries: u32, delay: Arc<DelayFn>) -> Self {
        Self { max_retries, delay }
    }

    /// Creates a default policy: five retries with exponential backoff.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_BACKOFF_MAX_TRIES, exponential_retry_delay())
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Wait before the 1-based `retry`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        (self.delay)(retry)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
