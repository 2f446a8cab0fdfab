use clap::Parser;
use storage_api_client::ClientBuilder;

use crate::args::CliArgs;
use crate::commands;
use crate::config::load_config;
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let mut config = load_config(args.config.clone())?;
    if let Some(level) = args.log_level.clone() {
        config.logging.level = level;
    }
    let _logger = init_logging(&config.logging)?;

    let settings = config.client.with_env().with_overrides(args.url, args.token);
    let client = ClientBuilder::from_settings(&settings)?.build()?;
    log::debug!("using Storage API at {:?}", client.url().map(|url| url.as_str()));

    commands::run(&client, args.command).await
}
