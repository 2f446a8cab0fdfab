use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    backoff::{exponential_retry_delay, simple_job_poll_delay, DEFAULT_JOB_POLL_MAX_DELAY},
    client::{ClientConfig, StorageClient},
    error::StorageError,
    executor::{RetryPolicy, RetryingExecutor},
    jobs::{JobPoller, PollLimits},
    transport::{HttpTransport, Transport},
};

use super::client_builder::ClientBuilder;
use super::state::BuilderState;

const DEFAULT_USER_AGENT: &str = concat!("storage-api-client/", env!("CARGO_PKG_VERSION"));

impl ClientBuilder {
    pub fn build(self) -> Result<StorageClient, StorageError> {
        self.state.build()
    }
}

impl BuilderState {
    fn build(self) -> Result<StorageClient, StorageError> {
        self.log_state();
        validate_poll_limits(&self.poll_limits)?;
        validate_timeout(self.timeout_seconds)?;
        let url = self.url.as_deref().map(parse_url).transpose()?;
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let url = url.clone().ok_or_else(|| {
                    StorageError::InvalidConfig("No Storage API URL provided".to_string())
                })?;
                let token = require_token(self.token)?;
                Arc::new(HttpTransport::new(
                    url,
                    token,
                    self.timeout_seconds.map(Duration::from_secs),
                    &user_agent,
                    self.run_id.clone(),
                )?)
            }
        };

        let policy = RetryPolicy::new(
            self.backoff_max_tries,
            self.retry_delay.unwrap_or_else(exponential_retry_delay),
        );
        let executor = Arc::new(RetryingExecutor::new(transport, policy));
        let poller = JobPoller::new(
            executor.clone(),
            self.job_poll_delay
                .unwrap_or_else(|| simple_job_poll_delay(DEFAULT_JOB_POLL_MAX_DELAY)),
            self.poll_limits,
        );

        let config = ClientConfig {
            url,
            run_id: self.run_id,
            user_agent,
            timeout_seconds: self.timeout_seconds,
            backoff_max_tries: self.backoff_max_tries,
            poll_limits: self.poll_limits,
        };
        Ok(StorageClient::from_parts(config, executor, poller))
    }

    fn log_state(&self) {
        log::debug!(
            "Building Storage API client. url={:?} backoff_max_tries={} custom_retry_delay={} custom_poll_delay={} poll_limits={:?} custom_transport={}",
            self.url,
            self.backoff_max_tries,
            self.retry_delay.is_some(),
            self.job_poll_delay.is_some(),
            self.poll_limits,
            self.transport.is_some(),
        );
    }
}

fn parse_url(raw: &str) -> Result<Url, StorageError> {
    let url = Url::parse(raw)
        .map_err(|err| StorageError::InvalidConfig(format!("Invalid Storage API URL {raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(StorageError::InvalidConfig(format!(
            "Storage API URL must use http or https: {raw}"
        )));
    }
    Ok(url)
}

fn require_token(token: Option<SecretString>) -> Result<SecretString, StorageError> {
    match token {
        Some(token) if !token.expose_secret().trim().is_empty() => Ok(token),
        _ => Err(StorageError::InvalidConfig(
            "No Storage API token provided".to_string(),
        )),
    }
}

fn validate_timeout(timeout_seconds: Option<u64>) -> Result<(), StorageError> {
    if timeout_seconds == Some(0) {
        return Err(StorageError::InvalidConfig(
            "timeout_seconds must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

fn validate_poll_limits(limits: &PollLimits) -> Result<(), StorageError> {
    if limits.max_attempts == Some(0) {
        return Err(StorageError::InvalidConfig(
            "job_poll_max_attempts must be greater than 0".to_string(),
        ));
    }
    if limits.max_duration == Some(Duration::ZERO) {
        return Err(StorageError::InvalidConfig(
            "job_poll_max_duration must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
