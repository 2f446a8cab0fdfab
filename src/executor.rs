#[path = "executor/config.rs"]
mod config;

#[path = "executor/wrapper.rs"]
mod wrapper;


pub use config::{RetryPolicy, DEFAULT_BACKOFF_MAX_TRIES};
pub use wrapper::RetryingExecutor;
