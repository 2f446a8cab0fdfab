use std::time::Duration;

use thiserror::Error;

use crate::jobs::JobId;

/// Code reported when the server sends none.
pub const UNKNOWN_ERROR_CODE: &str = "unknown";

/// Error types that can occur when talking to the Storage API.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Transport-level failure (connection refused, timeout, broken body)
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Non-retryable 4xx response
    #[error("Client error {status} [{code}]: {message}")]
    ClientError {
        status: u16,
        code: String,
        message: String,
        exception_id: Option<String>,
    },
    /// 5xx response, retried until the policy gives up
    #[error("Server error {status} [{code}]: {message}")]
    ServerError {
        status: u16,
        code: String,
        message: String,
        exception_id: Option<String>,
    },
    /// A polled job finished in the `error` state
    #[error("Job {job_id} failed [{code}]: {message}")]
    JobError {
        job_id: JobId,
        code: String,
        message: String,
        exception_id: Option<String>,
    },
    /// Polling budget exhausted before the job reached a terminal state
    #[error("Job {job_id} did not finish after {attempts} polls ({elapsed:?})")]
    MaxTriesExceeded {
        job_id: JobId,
        attempts: u32,
        elapsed: Duration,
    },
    /// Invalid client configuration, raised before any request is sent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
}

impl StorageError {
    /// Machine-readable code reported by the server, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::ClientError { code, .. }
            | Self::ServerError { code, .. }
            | Self::JobError { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request executor may retry after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::ServerError { .. })
    }
}

/// Converts reqwest HTTP errors into StorageErrors
impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
