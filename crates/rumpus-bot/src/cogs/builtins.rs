//! Built-in commands every bot instance carries.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::{Duration, sleep};

use rumpus_core::role::Role;
use rumpus_core::traits::Outbound;

use crate::command::Command;
use crate::cogs::{Cog, CommandSpec};
use crate::style::Style;

/// Longest timer we are willing to hold in memory.
const MAX_TIMER_SECS: u64 = 3600;

const SPECS: &[CommandSpec] = &[
    CommandSpec {
        name: "version",
        aliases: &[],
        description: "get the current version",
        min_role: Role::Guest,
    },
    CommandSpec {
        name: "uptime",
        aliases: &[],
        description: "get the bot's uptime",
        min_role: Role::Guest,
    },
    CommandSpec {
        name: "timer",
        aliases: &[],
        description: "a seconds timer",
        min_role: Role::Guest,
    },
];

/// The stock command set.
pub struct Builtins {
    started: DateTime<Utc>,
}

impl Builtins {
    pub fn new() -> Self {
        Self {
            started: Utc::now(),
        }
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cog for Builtins {
    fn name(&self) -> &'static str {
        "builtins"
    }

    fn specs(&self) -> &'static [CommandSpec] {
        SPECS
    }

    async fn run(&self, spec: &CommandSpec, c: &Command, out: &dyn Outbound) -> Result<()> {
        match spec.name {
            "version" => {
                let message = format!("currently running rumpus {}", env!("CARGO_PKG_VERSION"));
                out.send_message(&c.room, &message).await?;
            }
            "uptime" => {
                let alive = format_uptime(Utc::now() - self.started);
                let message = Style::Bold.apply(&format!("has been alive for {}", alive));
                out.send_message(&c.room, &message).await?;
            }
            "timer" => match c.args.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_TIMER_SECS).contains(&secs) => {
                    out.send_message(&c.room, &format!("timer set for {} seconds", secs))
                        .await?;
                    sleep(Duration::from_secs(secs)).await;
                    out.send_message(&c.room, "timer has expired!").await?;
                }
                _ => {
                    out.send_message(&c.room, "usage: timer <seconds>").await?;
                }
            },
            _ => {}
        }

        Ok(())
    }
}

fn format_uptime(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    // Semicolons, not colons: ":NN:" gets rendered as an emoji shortcode.
    format!("{};{:02};{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
