use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};

use crate::error::StorageError;

use super::{ApiRequest, ApiResponse, Transport};

const TOKEN_HEADER: &str = "X-StorageApi-Token";
const RUN_ID_HEADER: &str = "X-KBC-RunId";
const API_PREFIX: &str = "v2/storage";

/// Transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    token: SecretString,
    run_id: Option<String>,
}

impl HttpTransport {
    /// Creates a transport for `base_url` (scheme and host, e.g. `https://connection.example.com`).
    pub fn new(
        base_url: Url,
        token: SecretString,
        timeout: Option<Duration>,
        user_agent: &str,
        run_id: Option<String>,
    ) -> Result<Self, StorageError> {
        let mut builder = Client::builder().user_agent(user_agent.to_string());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url, token, run_id))
    }

    /// Creates a transport around an existing HTTP client.
    pub fn with_client(
        client: Client,
        base_url: Url,
        token: SecretString,
        run_id: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            token,
            run_id,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            API_PREFIX,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, StorageError> {
        let url = self.endpoint(&request.path);
        log::debug!("Storage API request: {} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(TOKEN_HEADER, self.token.expose_secret().as_str())
            .header(ACCEPT, "application/json");

        if let Some(run_id) = &self.run_id {
            builder = builder.header(RUN_ID_HEADER, run_id.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("Storage API request payload: {body}");
            }
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        log::debug!("Storage API HTTP status: {status} for {url}");

        let body = resp.text().await?;
        Ok(ApiResponse { status, body })
    }
}
