//! Main entry point for tunelog.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tunelog_cli::{execute, resolve_config, Cli};
use tunelog_common::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(&cli).context("Failed to load configuration")?;

    init_logging(&config.logging).context("Failed to initialize logging")?;
    info!("Starting tunelog {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = execute(&cli.command, &config) {
        error!("tunelog failed: {}", e);
        return Err(e.into());
    }

    info!("Done");
    Ok(())
}
