//! Server-side asynchronous jobs: their wire model, polling and aggregation.

#[path = "jobs/types.rs"]
mod types;

#[path = "jobs/poller.rs"]
mod poller;

#[path = "jobs/aggregator.rs"]
mod aggregator;


pub use aggregator::JobAggregator;
pub use poller::{JobPoller, PollLimits, DEFAULT_JOB_POLL_MAX_DURATION};
pub use types::{Job, JobFailure, JobId, JobStatus};
