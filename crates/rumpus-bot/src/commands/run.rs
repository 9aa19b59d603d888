//! Run command implementation.

use anyhow::Result;
use clap::Args;

use crate::bot::Bot;
use crate::cogs::{Registry, builtins::Builtins};
use crate::commands::open_room;
use crate::output;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Service base URL
    #[arg(long)]
    pub url: String,

    /// Room to join
    #[arg(long)]
    pub room: String,

    /// Handle to use in the room
    #[arg(long)]
    pub handle: Option<String>,

    /// Command prefix
    #[arg(long, default_value = "!")]
    pub prefix: String,

    /// Skip the session bootstrap and connect as a guest
    #[arg(long)]
    pub anonymous: bool,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let (client, socket) =
        open_room(&args.url, &args.room, args.handle.clone(), args.anonymous).await?;

    let mut registry = Registry::new();
    registry.register(Builtins::new());

    output::success(&format!("joined {}", args.room));

    let mut bot = Bot::new(registry, client, args.room, args.prefix, args.handle);
    bot.run(socket).await?;

    output::error("disconnected");
    Ok(())
}
