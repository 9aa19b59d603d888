//! rumpus - chat bot and event watcher for a real-time room service.
//!
//! This is a thin wrapper over the rumpus libraries; the interesting
//! parts live in `rumpus-core` (records, roles) and `rumpus-socket`
//! (transport).

mod bot;
mod cli;
mod cogs;
mod command;
mod commands;
mod output;
mod style;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Watch(args) => commands::watch::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
