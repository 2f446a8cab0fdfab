#[path = "storage-jobs/app.rs"]
mod app;
#[path = "storage-jobs/args.rs"]
mod args;
#[path = "storage-jobs/commands.rs"]
mod commands;
#[path = "storage-jobs/config.rs"]
mod config;
#[path = "storage-jobs/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
