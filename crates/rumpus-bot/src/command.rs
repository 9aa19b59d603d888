//! Parsing chat messages into bot commands.

use rumpus_core::model::{Message, User};
use rumpus_core::role::Role;

/// A parsed bot command.
#[derive(Debug, Clone)]
pub struct Command {
    /// The invoked name, lowercased.
    pub name: String,

    /// Everything after the name, trimmed; empty if none.
    pub args: String,

    /// The sender, if the message carried (or the roster resolved) one.
    pub sender: Option<User>,

    /// The room the command arrived in.
    pub room: String,
}

impl Command {
    /// Parse a chat message into a command.
    ///
    /// Returns `None` for anything that isn't prefixed, or is a bare
    /// prefix with no name.
    pub fn parse(message: &Message, prefix: &str) -> Option<Self> {
        let text = message.message.trim();
        let rest = text.strip_prefix(prefix)?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().filter(|name| !name.is_empty())?;
        let args = parts.next().unwrap_or("").trim().to_string();

        Some(Self {
            name: name.to_lowercase(),
            args,
            sender: message.sender.clone(),
            room: String::new(),
        })
    }

    /// The sender's resolved role; senders we can't identify are guests.
    pub fn sender_role(&self) -> Role {
        self.sender.as_ref().map(User::role).unwrap_or(Role::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rumpus_core::hydrate::{FieldPath, from_value};
    use serde_json::json;

    fn message(text: &str) -> Message {
        from_value(json!({ "message": text }), FieldPath::root("message")).unwrap()
    }

    #[test]
    fn parses_name_and_args() {
        let command = Command::parse(&message("!timer 30"), "!").unwrap();
        assert_eq!(command.name, "timer");
        assert_eq!(command.args, "30");
    }

    #[test]
    fn lowercases_the_name() {
        let command = Command::parse(&message("!Version"), "!").unwrap();
        assert_eq!(command.name, "version");
        assert_eq!(command.args, "");
    }

    #[test]
    fn ignores_unprefixed_text() {
        assert!(Command::parse(&message("hello there"), "!").is_none());
    }

    #[test]
    fn ignores_a_bare_prefix() {
        assert!(Command::parse(&message("!"), "!").is_none());
        assert!(Command::parse(&message("! args"), "!").is_none());
    }

    #[test]
    fn unidentified_sender_is_a_guest() {
        let command = Command::parse(&message("!version"), "!").unwrap();
        assert_eq!(command.sender_role(), Role::Guest);
    }

    #[test]
    fn sender_role_comes_from_the_attached_user() {
        let msg: Message = from_value(
            json!({ "message": "!ban kim", "sender": { "isSiteMod": true } }),
            FieldPath::root("message"),
        )
        .unwrap();
        let command = Command::parse(&msg, "!").unwrap();
        assert_eq!(command.sender_role(), Role::SiteMod);
    }
}
