use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "storage-jobs",
    about = "Trigger and follow asynchronous Storage API jobs",
    version
)]
pub struct CliArgs {
    /// Settings file (TOML or YAML)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// Storage API URL, overrides settings and STORAGE_API_URL
    #[arg(long, global = true)]
    pub url: Option<String>,
    /// Storage API token, overrides settings and STORAGE_API_TOKEN
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// Log level filter, e.g. `debug` or `storage_api_client=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show one job
    Job { id: u64 },
    /// List recent jobs
    Jobs {
        #[arg(long, short = 'l')]
        limit: Option<u32>,
    },
    /// Wait until all given jobs finish and print their results
    Wait {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Import an uploaded file into a table
    Import {
        table: String,
        #[arg(long)]
        file_id: u64,
        #[arg(long)]
        incremental: bool,
        /// Print the job id instead of waiting for the result
        #[arg(long)]
        no_wait: bool,
    },
    /// Export a table to a file
    Export {
        table: String,
        #[arg(long)]
        gzip: bool,
        #[arg(long)]
        no_wait: bool,
    },
}
