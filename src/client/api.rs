use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::StorageError,
    executor::RetryingExecutor,
    jobs::{JobAggregator, JobId, JobPoller, PollLimits},
    transport::ApiRequest,
};

/// Read-only view of the settings a client was built with.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `None` when a custom transport was supplied without a URL
    pub url: Option<Url>,
    pub run_id: Option<String>,
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
    pub backoff_max_tries: u32,
    pub poll_limits: PollLimits,
}

/// Client for the Storage API.
///
/// Cloning is cheap; clones share the transport and the retry and polling
/// configuration.
#[derive(Clone)]
pub struct StorageClient {
    pub(super) config: Arc<ClientConfig>,
    pub(super) executor: Arc<RetryingExecutor>,
    pub(super) poller: JobPoller,
    pub(super) aggregator: JobAggregator,
}

/// Body of the immediate answer of an async endpoint.
#[derive(Debug, Deserialize)]
struct AcceptedJob {
    id: JobId,
}

impl StorageClient {
    pub(crate) fn from_parts(
        config: ClientConfig,
        executor: Arc<RetryingExecutor>,
        poller: JobPoller,
    ) -> Self {
        Self {
            config: Arc::new(config),
            executor,
            aggregator: JobAggregator::new(poller.clone()),
            poller,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn url(&self) -> Option<&Url> {
        self.config.url.as_ref()
    }

    pub fn run_id(&self) -> Option<&str> {
        self.config.run_id.as_deref()
    }

    /// Sends a request through the retrying executor and parses the JSON answer.
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, StorageError> {
        self.executor.execute_json(request).await
    }

    pub async fn api_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        self.execute(&ApiRequest::get(path)).await
    }

    pub async fn api_post(&self, path: &str, body: Value) -> Result<Value, StorageError> {
        self.execute(&ApiRequest::post(path, body)).await
    }

    pub async fn api_put(&self, path: &str, body: Value) -> Result<Value, StorageError> {
        self.execute(&ApiRequest::put(path, body)).await
    }

    pub async fn api_delete(&self, path: &str) -> Result<(), StorageError> {
        self.executor.execute(&ApiRequest::delete(path)).await?;
        Ok(())
    }

    /// Triggers an asynchronous operation and returns the id of its job
    /// without waiting for it.
    pub async fn api_post_async(&self, path: &str, body: Value) -> Result<JobId, StorageError> {
        let accepted: AcceptedJob = self.execute(&ApiRequest::post(path, body)).await?;
        log::debug!("POST {path} accepted as job {}", accepted.id);
        Ok(accepted.id)
    }

    /// Triggers an asynchronous operation and waits for its result payload.
    pub async fn api_post_and_wait(&self, path: &str, body: Value) -> Result<Value, StorageError> {
        let job_id = self.api_post_async(path, body).await?;
        self.poller.wait_for_job_result(job_id).await
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
