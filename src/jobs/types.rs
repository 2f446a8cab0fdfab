use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{StorageError, UNKNOWN_ERROR_CODE};

/// Identifier of a server-side job.
///
/// Ids are assigned by the server in increasing order and compare as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(u64);

impl JobId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for JobId {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| StorageError::InvalidConfig(format!("Invalid job id: {s}")))
    }
}

// The API serializes ids as numbers, older endpoints as numeric strings.
impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(Self(id)),
            RawId::Text(text) => text
                .parse::<u64>()
                .map(Self)
                .map_err(|_| serde::de::Error::custom(format!("invalid job id: {text}"))),
        }
    }
}

/// Lifecycle state of a job: `waiting -> processing -> success | error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Waiting,
    Processing,
    Success,
    Error,
}

impl JobStatus {
    /// No transitions leave a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Waiting => "waiting",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Failure details attached to a job in the `error` state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFailure {
    #[serde(deserialize_with = "scalar_as_string")]
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub exception_id: Option<String>,
}

// `null` reads as absent; numbers and other scalars keep their JSON text.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Snapshot of a server-side asynchronous operation, as returned by `GET jobs/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub operation_params: Value,
    #[serde(default)]
    pub results: Option<Value>,
    #[serde(default)]
    pub error: Option<JobFailure>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl Job {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Turns a terminal job into the caller-facing outcome.
    ///
    /// Jobs in the `error` state become [`StorageError::JobError`]; every other
    /// job is returned as is.
    pub fn into_outcome(self) -> Result<Job, StorageError> {
        if self.status != JobStatus::Error {
            return Ok(self);
        }
        let failure = self.error.unwrap_or_default();
        Err(StorageError::JobError {
            job_id: self.id,
            code: failure
                .code
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string()),
            message: failure
                .message
                .unwrap_or_else(|| "no details provided".to_string()),
            exception_id: failure.exception_id,
        })
    }

    /// Result payload, `Null` when the server sent none.
    pub fn into_results(self) -> Value {
        self.results.unwrap_or(Value::Null)
    }
}
