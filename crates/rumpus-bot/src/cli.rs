//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{run::RunArgs, watch::WatchArgs};

/// Chat bot and event watcher for a real-time room service.
#[derive(Parser, Debug)]
#[command(name = "rumpus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Join a room and answer commands
    Run(RunArgs),

    /// Join a room and print its events
    Watch(WatchArgs),
}
