//! The seam between the client and the network.
//!
//! Everything above this module talks to a [`Transport`]; the reqwest-backed
//! [`HttpTransport`] is the production implementation, tests inject their own.

#[path = "transport/request.rs"]
mod request;

#[path = "transport/http.rs"]
mod http;

use async_trait::async_trait;

use crate::error::StorageError;

pub use http::HttpTransport;
pub use request::{ApiRequest, ApiResponse};

/// Sends one HTTP request to the Storage API.
///
/// Implementations report transport failures as [`StorageError::HttpError`] and
/// return every response that arrived, whatever its status; classification and
/// retries happen in the executor.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, StorageError>;
}
