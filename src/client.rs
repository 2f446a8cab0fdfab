#[path = "client/api.rs"]
mod api;

#[path = "client/jobs.rs"]
mod jobs;

#[path = "client/tables.rs"]
mod tables;


pub use api::{ClientConfig, StorageClient};
pub use tables::{ExportTableOptions, WriteTableOptions};
