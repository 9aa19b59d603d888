//! The cog subsystem: pluggable command groups.
//!
//! A cog bundles related commands. The registry resolves an invoked
//! alias to its cog, gates it on the sender's role, and dispatches.

pub mod builtins;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use rumpus_core::role::Role;
use rumpus_core::traits::Outbound;

use crate::command::Command;

/// Declaration of one command a cog handles.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Canonical name.
    pub name: &'static str,

    /// Alternative invocations.
    pub aliases: &'static [&'static str],

    /// One-line description.
    pub description: &'static str,

    /// Minimum role required to invoke.
    pub min_role: Role,
}

impl CommandSpec {
    /// Whether an invoked alias resolves to this command.
    pub fn matches(&self, alias: &str) -> bool {
        self.name == alias || self.aliases.contains(&alias)
    }
}

/// A group of related commands.
#[async_trait]
pub trait Cog: Send + Sync {
    /// The cog's name, for logs.
    fn name(&self) -> &'static str;

    /// The commands this cog declares.
    fn specs(&self) -> &'static [CommandSpec];

    /// Handle a command resolved to one of this cog's specs.
    async fn run(&self, spec: &CommandSpec, command: &Command, out: &dyn Outbound) -> Result<()>;
}

/// Outcome of a dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A cog handled the command.
    Handled,

    /// No cog declares the invoked name.
    Unknown,

    /// The sender's role is below the command's requirement.
    Denied { required: Role },
}

/// The command registry: every cog the bot runs with.
#[derive(Default)]
pub struct Registry {
    cogs: Vec<Box<dyn Cog>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cog. Registration order is resolution order.
    pub fn register(&mut self, cog: impl Cog + 'static) {
        self.cogs.push(Box::new(cog));
    }

    /// Resolve an invoked alias to its cog and spec.
    pub fn resolve(&self, alias: &str) -> Option<(&dyn Cog, &CommandSpec)> {
        self.cogs.iter().find_map(|cog| {
            cog.specs()
                .iter()
                .find(|spec| spec.matches(alias))
                .map(|spec| (cog.as_ref(), spec))
        })
    }

    /// Gate on the sender's role, then hand the command to its cog.
    pub async fn dispatch(&self, command: &Command, out: &dyn Outbound) -> Result<Dispatch> {
        let Some((cog, spec)) = self.resolve(&command.name) else {
            return Ok(Dispatch::Unknown);
        };

        let role = command.sender_role();
        if role < spec.min_role {
            debug!(
                command = spec.name,
                %role,
                required = %spec.min_role,
                "command denied"
            );
            return Ok(Dispatch::Denied {
                required: spec.min_role,
            });
        }

        debug!(cog = cog.name(), command = spec.name, "dispatching");
        cog.run(spec, command, out).await?;
        Ok(Dispatch::Handled)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingOutbound;
    use super::*;

    use rumpus_core::hydrate::{FieldPath, from_value};
    use rumpus_core::model::Message;
    use serde_json::json;

    struct Moderation;

    const MOD_SPECS: &[CommandSpec] = &[CommandSpec {
        name: "ban",
        aliases: &["kick"],
        description: "ban a user",
        min_role: Role::Mod,
    }];

    #[async_trait]
    impl Cog for Moderation {
        fn name(&self) -> &'static str {
            "moderation"
        }

        fn specs(&self) -> &'static [CommandSpec] {
            MOD_SPECS
        }

        async fn run(
            &self,
            _spec: &CommandSpec,
            command: &Command,
            out: &dyn Outbound,
        ) -> Result<()> {
            out.send_message(&command.room, "done").await?;
            Ok(())
        }
    }

    fn command(text: &str, sender: serde_json::Value) -> Command {
        let message: Message = from_value(
            json!({ "message": text, "sender": sender }),
            FieldPath::root("message"),
        )
        .unwrap();
        Command::parse(&message, "!").unwrap()
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(Moderation);
        registry
    }

    #[tokio::test]
    async fn dispatches_to_the_owning_cog() {
        let out = RecordingOutbound::default();
        let cmd = command("!ban kim", json!({ "operator_id": "abc" }));

        let outcome = registry().dispatch(&cmd, &out).await.unwrap();
        assert_eq!(outcome, Dispatch::Handled);
        assert_eq!(out.messages(), ["done"]);
    }

    #[tokio::test]
    async fn resolves_aliases() {
        let out = RecordingOutbound::default();
        let cmd = command("!kick kim", json!({ "operator_id": "abc" }));

        let outcome = registry().dispatch(&cmd, &out).await.unwrap();
        assert_eq!(outcome, Dispatch::Handled);
    }

    #[tokio::test]
    async fn denies_below_the_required_role() {
        let out = RecordingOutbound::default();
        // A supporter ranks below mod in the privilege order.
        let cmd = command("!ban kim", json!({ "isGold": true }));

        let outcome = registry().dispatch(&cmd, &out).await.unwrap();
        assert_eq!(
            outcome,
            Dispatch::Denied {
                required: Role::Mod
            }
        );
        assert!(out.messages().is_empty());
    }

    #[tokio::test]
    async fn allows_at_or_above_the_required_role() {
        let out = RecordingOutbound::default();
        let cmd = command("!ban kim", json!({ "isSiteMod": true }));

        let outcome = registry().dispatch(&cmd, &out).await.unwrap();
        assert_eq!(outcome, Dispatch::Handled);
    }

    #[tokio::test]
    async fn unknown_commands_are_reported_not_errors() {
        let out = RecordingOutbound::default();
        let cmd = command("!dance", json!({}));

        let outcome = registry().dispatch(&cmd, &out).await.unwrap();
        assert_eq!(outcome, Dispatch::Unknown);
    }
}
