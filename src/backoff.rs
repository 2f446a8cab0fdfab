#[path = "backoff/delay.rs"]
mod delay;

#[path = "backoff/strategy.rs"]
mod strategy;

pub use delay::{
    constant_delay, exponential_retry_delay, linear_delay, simple_job_poll_delay, DelayFn,
    DEFAULT_JOB_POLL_MAX_DELAY,
};
pub use strategy::DelayStrategy;
