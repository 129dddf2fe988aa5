//! pomgate CLI library
//!
//! The binary in `main.rs` is a thin wrapper around [`run`]; keeping the
//! command handlers in a library lets integration tests drive them directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

use pomgate_core::config::PomgateConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

/// Initialise logging and dispatch the parsed command.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    // Only the logging section is needed here; config errors surface when the command runs.
    let mut config = PomgateConfig::from_file(&cli.config)
        .await
        .unwrap_or_default();
    config.apply_env_overrides();
    let mut general = config.general;
    if let Some(ref level) = cli.log_level {
        general.log_level = level.clone();
    }
    logging::init_tracing(&general)?;

    let writer = OutputWriter::new(cli.output);
    dispatch(cli.command, &cli.config, &writer).await
}

/// Dispatch a command without touching the global logger.
pub async fn dispatch(
    command: Commands,
    config_path: &std::path::Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match command {
        Commands::Detect => commands::detect::execute(config_path, writer).await,
        Commands::Scan(args) => commands::scan::execute(args, config_path, writer).await,
        Commands::Config(args) => commands::config::execute(args, config_path, writer).await,
    }
}
