use serde_json::Value;

use crate::{
    error::StorageError,
    jobs::{Job, JobId},
    transport::ApiRequest,
};

use super::api::StorageClient;

impl StorageClient {
    pub async fn get_job(&self, job_id: JobId) -> Result<Job, StorageError> {
        self.poller.get_job(job_id).await
    }

    /// Most recent jobs of the project, newest first.
    pub async fn list_jobs(&self, limit: Option<u32>) -> Result<Vec<Job>, StorageError> {
        let mut request = ApiRequest::get("jobs");
        if let Some(limit) = limit {
            request = request.with_query("limit", limit);
        }
        self.execute(&request).await
    }

    /// Polls a job until it succeeds; see [`JobPoller::wait_for_job`](crate::jobs::JobPoller::wait_for_job).
    pub async fn wait_for_job(&self, job_id: JobId) -> Result<Job, StorageError> {
        self.poller.wait_for_job(job_id).await
    }

    /// Waits for all jobs; see [`JobAggregator::handle_async_tasks`](crate::jobs::JobAggregator::handle_async_tasks).
    pub async fn handle_async_tasks(&self, job_ids: &[JobId]) -> Result<Vec<Value>, StorageError> {
        self.aggregator.handle_async_tasks(job_ids).await
    }
}
