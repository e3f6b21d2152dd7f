//! flaircheck -- end-to-end checks for a flair service.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use flaircheck_core::config::FlairCheckConfig;

use crate::cli::{Cli, Commands, RunArgs};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config: config_path,
        log_level,
        output,
        command,
    } = cli;
    let writer = OutputWriter::new(output);

    match command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Config(args) => commands::config::execute(args, &config_path, &writer).await,
        Commands::Run(args) => {
            let config = prepare(&config_path, log_level).await?;
            commands::run::execute(args, &config, &writer).await
        }
        Commands::Probe => {
            prepare(&config_path, log_level).await?;
            commands::probe::execute(&writer).await
        }
    }
}

/// Load the configuration and install the tracing subscriber.
async fn prepare(
    config_path: &Path,
    log_level: Option<String>,
) -> Result<FlairCheckConfig, CliError> {
    let mut config = FlairCheckConfig::load_or_default(config_path).await?;
    if let Some(level) = log_level {
        config.general.log_level = level;
    }

    logging::init_tracing(&config.general).map_err(|e| CliError::Command(e.to_string()))?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    Ok(config)
}
