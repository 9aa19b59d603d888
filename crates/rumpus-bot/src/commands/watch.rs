//! Watch command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use futures_util::StreamExt;

use rumpus_core::RoomEvent;

use crate::commands::open_room;
use crate::output;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Service base URL
    #[arg(long)]
    pub url: String,

    /// Room to join
    #[arg(long)]
    pub room: String,

    /// Handle to use in the room
    #[arg(long)]
    pub handle: Option<String>,

    /// Output events as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the session bootstrap and connect as a guest
    #[arg(long)]
    pub anonymous: bool,
}

pub async fn run(args: WatchArgs) -> Result<()> {
    let (_client, mut socket) =
        open_room(&args.url, &args.room, args.handle, args.anonymous).await?;

    eprintln!("{}", "Watching room events...".dimmed());
    eprintln!("{}", "Press Ctrl+C to stop.".dimmed());
    eprintln!();

    while let Some(result) = socket.next().await {
        match result {
            Ok(event) => print_event(&event, args.json)?,
            Err(e) => output::error(&e.to_string()),
        }
    }

    Ok(())
}

fn print_event(event: &RoomEvent, json: bool) -> Result<()> {
    match event {
        RoomEvent::Message(m) => {
            if json {
                output::json(m)?;
            } else {
                let handle = m.handle.as_deref().unwrap_or("?");
                println!("{} {} {}", "MESSAGE".green(), handle.dimmed(), m.message);
            }
        }
        RoomEvent::Status(s) => {
            if json {
                output::json(s)?;
            } else {
                println!("{} {}", "STATUS".blue(), s.message);
            }
        }
        RoomEvent::Join(j) => {
            if json {
                output::json(j)?;
            } else {
                let handle = j.user.handle.as_deref().unwrap_or("?");
                println!("{} {} ({})", "JOIN".cyan(), handle, j.user.role());
            }
        }
        RoomEvent::UserList(l) => {
            if json {
                output::json(l)?;
            } else {
                println!(
                    "{} {} {} users",
                    "ROOM".magenta(),
                    l.name.as_deref().unwrap_or("?"),
                    l.users.len()
                );
            }
        }
        RoomEvent::UpdateUserList(u) => {
            if json {
                output::json(u)?;
            } else {
                let handle = u.user.handle.as_deref().unwrap_or("?");
                println!("{} {} ({})", "ROSTER".magenta(), handle, u.user.role());
            }
        }
        RoomEvent::HandleChange(h) => {
            if json {
                output::json(h)?;
            } else {
                println!("{} -> {}", "HANDLE".magenta(), h.handle);
            }
        }
        RoomEvent::Banlist(b) => {
            if json {
                output::json(b)?;
            } else {
                println!("{} {} entries", "BANLIST".red(), b.list.len());
                for item in &b.list {
                    println!("  {} @ {}", item.handle, item.timestamp);
                }
            }
        }
        RoomEvent::PlaylistUpdate(items) => {
            if json {
                output::json(items)?;
            } else {
                println!("{} {} items", "PLAYLIST".yellow(), items.len());
            }
        }
        RoomEvent::PlayVideo(p) => {
            if json {
                output::json(p)?;
            } else {
                println!("{} {}", "PLAY".yellow(), p.title.as_deref().unwrap_or("?"));
            }
        }
        RoomEvent::Error(e) => {
            if json {
                output::json(e)?;
            } else {
                println!(
                    "{} {} {}",
                    "ERROR".red(),
                    e.context.dimmed(),
                    e.message.as_deref().unwrap_or("")
                );
            }
        }
        RoomEvent::Unknown { kind } => {
            if !json {
                eprintln!("{} {}", "UNKNOWN".dimmed(), kind);
            }
        }
    }

    Ok(())
}
