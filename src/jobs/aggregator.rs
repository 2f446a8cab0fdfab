use futures::future::try_join_all;
use serde_json::Value;

use crate::error::StorageError;

use super::poller::JobPoller;
use super::types::{Job, JobId};

/// Waits on several jobs at once and combines their outcomes.
#[derive(Debug, Clone)]
pub struct JobAggregator {
    poller: JobPoller,
}

impl JobAggregator {
    pub fn new(poller: JobPoller) -> Self {
        Self { poller }
    }

    /// Waits for every job and returns their result payloads in input order.
    ///
    /// The first job that fails ends the wait with its error. Remaining jobs
    /// are no longer polled but keep running on the server.
    pub async fn handle_async_tasks(&self, job_ids: &[JobId]) -> Result<Vec<Value>, StorageError> {
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }
        log::debug!("Waiting for {} job(s): {job_ids:?}", job_ids.len());

        let waits = job_ids.iter().map(|&job_id| async move {
            self.poller.wait_for_job(job_id).await.map(Job::into_results)
        });
        try_join_all(waits).await
    }
}
