use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, Instant};

use crate::{
    backoff::DelayFn,
    error::StorageError,
    executor::RetryingExecutor,
    transport::ApiRequest,
};

use super::types::{Job, JobId, JobStatus};

/// Wall-clock budget of one `wait_for_job` call unless configured otherwise.
pub const DEFAULT_JOB_POLL_MAX_DURATION: Duration = Duration::from_secs(3600);

/// Upper bounds on how long a single job is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollLimits {
    /// Maximum number of status requests
    pub max_attempts: Option<u32>,
    /// Maximum wall-clock time spent waiting
    pub max_duration: Option<Duration>,
}

impl PollLimits {
    pub fn defaults() -> Self {
        Self {
            max_attempts: None,
            max_duration: Some(DEFAULT_JOB_POLL_MAX_DURATION),
        }
    }

    /// Polls until the job finishes, however long that takes.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            max_duration: None,
        }
    }
}

impl Default for PollLimits {
    fn default() -> Self {
        Self::defaults()
    }
}

/// State of one polling loop.
struct PollingSession {
    job_id: JobId,
    attempt: u32,
    started: Instant,
    last_status: Option<JobStatus>,
}

impl PollingSession {
    fn start(job_id: JobId) -> Self {
        Self {
            job_id,
            attempt: 0,
            started: Instant::now(),
            last_status: None,
        }
    }

    fn polls(&self) -> u32 {
        self.attempt.saturating_add(1)
    }

    fn observe(&mut self, status: JobStatus) {
        if self.last_status != Some(status) {
            log::debug!(
                "Job {} is {status} after {} poll(s)",
                self.job_id,
                self.polls()
            );
        }
        self.last_status = Some(status);
    }

    /// Fails when another wait of `delay` would break the limits.
    fn ensure_budget(&self, limits: &PollLimits, delay: Duration) -> Result<(), StorageError> {
        let elapsed = self.started.elapsed();
        let attempts_spent = limits
            .max_attempts
            .is_some_and(|max| self.polls() >= max);
        let time_spent = limits
            .max_duration
            .is_some_and(|max| elapsed.saturating_add(delay) > max);

        if attempts_spent || time_spent {
            log::warn!(
                "Giving up on job {} after {} poll(s), last status {:?}",
                self.job_id,
                self.polls(),
                self.last_status
            );
            return Err(StorageError::MaxTriesExceeded {
                job_id: self.job_id,
                attempts: self.polls(),
                elapsed,
            });
        }
        Ok(())
    }

    fn advance(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
    }
}

/// Polls job resources until they reach a terminal state.
#[derive(Clone)]
pub struct JobPoller {
    executor: Arc<RetryingExecutor>,
    delay: Arc<DelayFn>,
    limits: PollLimits,
}

impl JobPoller {
    /// `delay(n)` is waited between poll `n` and `n + 1`, counting from 0.
    pub fn new(executor: Arc<RetryingExecutor>, delay: Arc<DelayFn>, limits: PollLimits) -> Self {
        Self {
            executor,
            delay,
            limits,
        }
    }

    pub fn limits(&self) -> PollLimits {
        self.limits
    }

    /// Fetches the current snapshot of a job.
    pub async fn get_job(&self, job_id: JobId) -> Result<Job, StorageError> {
        self.executor
            .execute_json(&ApiRequest::get(format!("jobs/{job_id}")))
            .await
    }

    /// Polls `job_id` until it succeeds or fails.
    ///
    /// A failed job is returned as [`StorageError::JobError`]; running out of
    /// [`PollLimits`] as [`StorageError::MaxTriesExceeded`].
    pub async fn wait_for_job(&self, job_id: JobId) -> Result<Job, StorageError> {
        let mut session = PollingSession::start(job_id);

        loop {
            let job = self.get_job(job_id).await?;
            session.observe(job.status);

            if job.is_terminal() {
                log::info!(
                    "Job {job_id} finished with status {} in {:?}",
                    job.status,
                    session.started.elapsed()
                );
                return job.into_outcome();
            }

            let delay = (self.delay)(session.attempt);
            session.ensure_budget(&self.limits, delay)?;
            sleep(delay).await;
            session.advance();
        }
    }

    /// Waits for the job and returns its result payload (`Null` when empty).
    pub async fn wait_for_job_result(&self, job_id: JobId) -> Result<Value, StorageError> {
        Ok(self.wait_for_job(job_id).await?.into_results())
    }
}

impl std::fmt::Debug for JobPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobPoller")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}
