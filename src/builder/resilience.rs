use std::sync::Arc;
use std::time::Duration;

use super::client_builder::ClientBuilder;

impl ClientBuilder {
    /// Sets how many times a failed request is retried.
    pub fn backoff_max_tries(mut self, retries: u32) -> Self {
        self.state.backoff_max_tries = retries;
        self
    }

    /// Sets the wait before each request retry; called with the 1-based retry number.
    pub fn retry_delay<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.state.retry_delay = Some(Arc::new(f));
        self
    }

    /// Sets the wait between job status polls; called with the 0-based poll index.
    pub fn job_poll_delay<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.state.job_poll_delay = Some(Arc::new(f));
        self
    }

    /// Limits the number of status requests per job.
    pub fn job_poll_max_attempts(mut self, attempts: u32) -> Self {
        self.state.poll_limits.max_attempts = Some(attempts);
        self
    }

    /// Limits the wall-clock time spent waiting for one job.
    pub fn job_poll_max_duration(mut self, duration: Duration) -> Self {
        self.state.poll_limits.max_duration = Some(duration);
        self
    }

    /// Removes both polling limits.
    pub fn job_poll_unbounded(mut self) -> Self {
        self.state.poll_limits.max_attempts = None;
        self.state.poll_limits.max_duration = None;
        self
    }
}
