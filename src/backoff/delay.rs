use std::sync::Arc;
use std::time::Duration;

/// A function mapping an attempt count to the time to wait before the next attempt.
///
/// The executor calls it with the 1-based number of the retry about to be made,
/// the job poller with the 0-based index of the poll that just returned a
/// non-terminal job. Output is used verbatim.
pub type DelayFn = dyn Fn(u32) -> Duration + Send + Sync + 'static;

/// Default ceiling, in seconds, of the job polling delay.
pub const DEFAULT_JOB_POLL_MAX_DELAY: u64 = 20;

fn pow2_seconds(exponent: u32) -> u64 {
    1u64.checked_shl(exponent).unwrap_or(u64::MAX)
}

/// Job polling delay: `min(2^attempt, max_delay_seconds)` seconds.
pub fn simple_job_poll_delay(max_delay_seconds: u64) -> Arc<DelayFn> {
    Arc::new(move |attempt: u32| Duration::from_secs(pow2_seconds(attempt).min(max_delay_seconds)))
}

/// Request retry delay: `2^(retry - 1)` seconds, so the first retry waits one second.
pub fn exponential_retry_delay() -> Arc<DelayFn> {
    Arc::new(|retry: u32| Duration::from_secs(pow2_seconds(retry.saturating_sub(1))))
}

/// `attempt * unit`.
pub fn linear_delay(unit: Duration) -> Arc<DelayFn> {
    Arc::new(move |attempt: u32| unit.saturating_mul(attempt))
}

pub fn constant_delay(delay: Duration) -> Arc<DelayFn> {
    Arc::new(move |_: u32| delay)
}
