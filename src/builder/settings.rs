use std::time::Duration;

use secrecy::SecretString;

use crate::{error::StorageError, settings::ClientSettings};

use super::client_builder::ClientBuilder;

impl ClientBuilder {
    /// Creates a builder from file settings.
    ///
    /// Delay strategies are resolved here, so a bad one fails before any
    /// client or connection exists.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, StorageError> {
        let mut builder = Self::new();
        let state = &mut builder.state;

        state.url = settings.url.clone();
        state.token = settings.token.clone().map(SecretString::new);
        state.timeout_seconds = settings.timeout_seconds;
        state.user_agent = settings.user_agent.clone();
        state.run_id = settings.run_id.clone();
        state.backoff_max_tries = settings.backoff_max_tries;
        state.retry_delay = Some(settings.retry_delay.build()?);
        state.job_poll_delay = Some(settings.job_poll_delay.build()?);
        state.poll_limits.max_attempts = settings.job_poll_max_attempts;
        state.poll_limits.max_duration = settings
            .job_poll_max_duration_seconds
            .map(Duration::from_secs);

        Ok(builder)
    }
}
