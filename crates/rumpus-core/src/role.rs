//! Permission roles derived from a user's flags.

use std::fmt;

use serde::Serialize;

/// A user's effective permission level in a room.
///
/// The derive order gives ascending privilege for gating comparisons:
/// `Guest < Supporter < Op < Mod < SiteMod < SiteOwner`. Note that the
/// ordering is independent of how [`User::role`](crate::model::User::role)
/// resolves a role — a supporter flag wins resolution but ranks low here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    Supporter,
    Op,
    Mod,
    SiteMod,
    SiteOwner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Guest => "guest",
            Role::Supporter => "supporter",
            Role::Op => "op",
            Role::Mod => "mod",
            Role::SiteMod => "site mod",
            Role::SiteOwner => "site owner",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_order() {
        assert!(Role::Guest < Role::Supporter);
        assert!(Role::Supporter < Role::Op);
        assert!(Role::Op < Role::Mod);
        assert!(Role::Mod < Role::SiteMod);
        assert!(Role::SiteMod < Role::SiteOwner);
    }
}
