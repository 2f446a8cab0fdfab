use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    error::StorageError,
    transport::{ApiRequest, ApiResponse, Transport},
};

use super::config::RetryPolicy;

/// Executes API requests, retrying transport failures and 5xx responses.
pub struct RetryingExecutor {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl RetryingExecutor {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `request` until it yields a non-error response or the policy runs out.
    ///
    /// 4xx responses fail immediately. When retries are exhausted the last
    /// transport or server error is returned unchanged.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, StorageError> {
        let mut retries = 0u32;

        loop {
            let outcome = self
                .transport
                .send(request)
                .await
                .and_then(ApiResponse::error_for_status);

            let err = match outcome {
                Ok(resp) => return Ok(resp),
                Err(err) => err,
            };
            if !err.is_transient() || retries >= self.policy.max_retries() {
                return Err(err);
            }

            retries += 1;
            let delay = self.policy.delay_for(retries);
            log::warn!(
                "{} {} failed: {err}. Retry {retries}/{} in {delay:?}",
                request.method,
                request.path,
                self.policy.max_retries()
            );
            sleep(delay).await;
        }
    }

    /// Like [`execute`](Self::execute), parsing the response body as JSON.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, StorageError> {
        self.execute(request).await?.json()
    }
}
