use std::sync::Arc;

use secrecy::SecretString;

use crate::transport::Transport;

use super::state::BuilderState;

/// Builder for configuring and instantiating a [`StorageClient`](crate::client::StorageClient).
///
/// Every setting is validated by [`build`](Self::build); the resulting client
/// is immutable.
pub struct ClientBuilder {
    pub(super) state: BuilderState,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            state: BuilderState::new(),
        }
    }
}

impl ClientBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Storage API URL, e.g. `https://connection.example.com`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.state.url = Some(url.into());
        self
    }

    /// Sets the Storage API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.state.token = Some(SecretString::new(token.into()));
        self
    }

    /// Sets the per-request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.state.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.state.user_agent = Some(user_agent.into());
        self
    }

    /// Run id sent with every request for server-side log correlation.
    pub fn run_id(mut self, run_id: impl Into<String>) -> Self {
        self.state.run_id = Some(run_id.into());
        self
    }

    /// Replaces the HTTP transport. URL and token are then optional.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.state.transport = Some(transport);
        self
    }
}
