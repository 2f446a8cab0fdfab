use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

use super::delay::{
    constant_delay, exponential_retry_delay, linear_delay, simple_job_poll_delay, DelayFn,
};

/// Named delay function, for settings files.
///
/// Only these variants are accepted; anything else fails to deserialize and the
/// client is never built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DelayStrategy {
    /// `2^(retry - 1)` seconds
    Exponential,
    /// `min(2^attempt, max_delay_seconds)` seconds
    CappedExponential { max_delay_seconds: u64 },
    /// `attempt * unit_ms` milliseconds
    Linear { unit_ms: u64 },
    /// Fixed wait
    Constant { delay_ms: u64 },
}

impl DelayStrategy {
    /// Checks the parameters and turns the strategy into a delay function.
    pub fn build(&self) -> Result<Arc<DelayFn>, StorageError> {
        match *self {
            Self::Exponential => Ok(exponential_retry_delay()),
            Self::CappedExponential { max_delay_seconds: 0 } => Err(StorageError::InvalidConfig(
                "capped_exponential max_delay_seconds must be greater than 0".to_string(),
            )),
            Self::CappedExponential { max_delay_seconds } => {
                Ok(simple_job_poll_delay(max_delay_seconds))
            }
            Self::Linear { unit_ms } => Ok(linear_delay(Duration::from_millis(unit_ms))),
            Self::Constant { delay_ms } => Ok(constant_delay(Duration::from_millis(delay_ms))),
        }
    }
}
