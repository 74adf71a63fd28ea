mod cli;
mod commands;
mod config;
mod logging;
mod server;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Serve { host, port } => commands::serve(&config, host, port).await,
        Command::Generate(args) => commands::generate(&config, args).await,
        Command::Describe(args) => commands::describe(&config, args).await,
    }
}
