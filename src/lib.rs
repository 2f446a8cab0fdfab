//! Storage API client with request retries and asynchronous job handling.
//!
//! Requests go through a [`RetryingExecutor`](executor::RetryingExecutor) that
//! retries transport failures and 5xx responses with a configurable backoff.
//! Endpoints that answer with a job id are followed up by a
//! [`JobPoller`](jobs::JobPoller), and several jobs can be awaited together
//! with a [`JobAggregator`](jobs::JobAggregator).
//!
//! ```no_run
//! use storage_api_client::{builder::ClientBuilder, client::WriteTableOptions};
//!
//! # async fn run() -> Result<(), storage_api_client::error::StorageError> {
//! let client = ClientBuilder::new()
//!     .url("https://connection.example.com")
//!     .token("my-token")
//!     .backoff_max_tries(4)
//!     .build()?;
//!
//! let first = client
//!     .write_table_async("in.c-main.users", &WriteTableOptions::new(1001))
//!     .await?;
//! let second = client
//!     .write_table_async("in.c-main.orders", &WriteTableOptions::new(1002))
//!     .await?;
//! let results = client.handle_async_tasks(&[first, second]).await?;
//! # let _ = results;
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod builder;
pub mod client;
pub mod error;
pub mod executor;
pub mod jobs;
pub mod settings;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use builder::ClientBuilder;
pub use client::StorageClient;
pub use error::StorageError;
pub use jobs::{Job, JobId, JobStatus};
